use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetdashError {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stylesheet error: {0}")]
    Style(#[from] tcss::TcssError),

    #[error("Layout error: {0}")]
    Layout(#[from] tcss_layout::LayoutError),
}

pub type Result<T> = std::result::Result<T, NetdashError>;
