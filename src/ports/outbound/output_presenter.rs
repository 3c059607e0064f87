use crate::shared::Result;

/// OutputPresenter port for presenting the rendered report
pub trait OutputPresenter {
    /// Presents the rendered report to the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the output destination fails
    fn present(&self, content: &str) -> Result<()>;
}
