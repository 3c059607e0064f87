/// ProgressReporter port for reporting progress during an assessment
///
/// Progress goes to a side channel (stderr) so it never mixes with the
/// report itself.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports how many packages have been assessed so far
    ///
    /// # Arguments
    /// * `current` - Packages finished
    /// * `total` - Packages to assess
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning that does not stop the run
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
