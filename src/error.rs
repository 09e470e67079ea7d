use thiserror::Error;

use crate::core::ViewId;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown graph view: {}", .0.raw())]
    UnknownView(ViewId),

    #[error("render failed: {0}")]
    Render(String),
}
