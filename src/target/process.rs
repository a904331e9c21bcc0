use alloc::string::String;

use crate::target::Target;

/// Memory layout of a loaded inferior, taken from its basepage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    pub text_base: u32,
    pub text_len: u32,
    pub data_base: u32,
    pub data_len: u32,
    pub bss_base: u32,
    pub bss_len: u32,
}

impl Image {
    /// One past the last bss byte.
    pub fn bss_end(&self) -> u32 {
        self.bss_base.wrapping_add(self.bss_len)
    }
}

/// What the runtime should do once the server is done handling an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionAction {
    /// Return from the exception and keep running the inferior, using the
    /// (possibly modified) register frame.
    Resume,
    /// Terminate the inferior with the given exit code. Control comes back
    /// out of [`Process::run_inferior`].
    Terminate(i16),
}

/// How a call to [`Process::run_inferior`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The inferior terminated by itself with the given exit code.
    Exited(i32),
    /// The server asked for termination with
    /// [`ExceptionAction::Terminate`].
    Terminated(i32),
}

/// Loading and running the inferior.
///
/// `run_inferior` takes the place of the platform's "execute and return"
/// call: whenever the inferior raises a hooked exception, the runtime calls
/// `on_exception` with the vector number before deciding whether to return
/// into the inferior or terminate it.
pub trait Process: Target {
    /// Load (but do not start) an executable. `args` is a single space
    /// separated command line.
    fn load(&mut self, filename: &str, args: &str, env: Option<&str>)
        -> Result<Image, Self::Error>;

    /// Start a loaded inferior and block until it terminates. The image is
    /// released by the time this returns.
    fn run_inferior(
        &mut self,
        image: &Image,
        on_exception: &mut dyn FnMut(&mut Self, u16) -> ExceptionAction,
    ) -> Result<RunOutcome, Self::Error>;

    /// Release a loaded inferior that was never started.
    fn free(&mut self, image: Image);

    /// Select the current drive (0 = `A:`).
    fn set_drive(&mut self, drive: u16);

    /// Set the current directory on the current drive.
    fn set_path(&mut self, path: &str) -> Result<(), Self::Error>;

    /// The current working directory, including the drive.
    fn current_dir(&mut self) -> Option<String>;
}
