use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{MailboxError, MailboxResult};
use crate::property::PropertyFrame;

pub const DEFAULT_MAILBOX_DEVICE: &str = "/dev/vcio";

/// Major number the vcio driver registers its ioctl under.
pub const VCIO_IOC_MAGIC: u8 = 100;
pub const VCIO_IOC_PROPERTY: u8 = 0;

/// One synchronous request/response round trip with the firmware.
///
/// The frame is both input and output: the firmware overwrites codes and
/// value words in place.
pub trait MailboxChannel {
    fn exchange(&self, frame: &mut PropertyFrame) -> MailboxResult<()>;
}

impl<T: MailboxChannel + ?Sized> MailboxChannel for &T {
    fn exchange(&self, frame: &mut PropertyFrame) -> MailboxResult<()> {
        (**self).exchange(frame)
    }
}

#[cfg(target_os = "linux")]
mod ioctl {
    use crate::property::PropertyFrame;

    // The driver declares the request as `_IOWR(100, 0, char *)`, so the size
    // encoded in the request number is that of a pointer, not of the frame.
    nix::ioctl_readwrite_bad!(
        vcio_property,
        nix::request_code_readwrite!(
            super::VCIO_IOC_MAGIC,
            super::VCIO_IOC_PROPERTY,
            std::mem::size_of::<*mut std::ffi::c_char>()
        ),
        PropertyFrame
    );
}

/// Open handle to the mailbox device. Closed on drop.
#[derive(Debug)]
pub struct VcioHandle {
    path: PathBuf,
    file: std::fs::File,
}

pub struct VcioDevice;

impl VcioDevice {
    pub fn open(path: &Path) -> MailboxResult<VcioHandle> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|source| MailboxError::ChannelUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(VcioHandle {
            path: path.to_path_buf(),
            file,
        })
    }
}

impl VcioHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(target_os = "linux")]
    pub fn exchange(&mut self, frame: &mut PropertyFrame) -> MailboxResult<()> {
        use std::os::fd::AsRawFd;

        let fd = self.file.as_raw_fd();
        // SAFETY: `frame` is an exclusively borrowed, 16-byte aligned buffer of
        // FRAME_WORDS words, the size the driver copies in and out, and `fd`
        // stays open for the duration of the call.
        let status = unsafe { ioctl::vcio_property(fd, frame as *mut PropertyFrame) };
        status.map(|_| ()).map_err(|errno| MailboxError::IoctlFailed {
            path: self.path.clone(),
            errno: errno as i32,
        })
    }

    #[cfg(not(target_os = "linux"))]
    pub fn exchange(&mut self, _frame: &mut PropertyFrame) -> MailboxResult<()> {
        Err(MailboxError::IoctlFailed {
            path: self.path.clone(),
            errno: 95,
        })
    }

    pub fn close(self) {
        debug!(path = %self.path.display(), "closing mailbox device");
        drop(self.file);
    }
}

/// Opens the device for each exchange and closes it before returning.
#[derive(Debug, Clone)]
pub struct VcioChannel {
    path: PathBuf,
}

impl VcioChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for VcioChannel {
    fn default() -> Self {
        Self::new(DEFAULT_MAILBOX_DEVICE)
    }
}

impl MailboxChannel for VcioChannel {
    fn exchange(&self, frame: &mut PropertyFrame) -> MailboxResult<()> {
        let mut handle = VcioDevice::open(&self.path)?;
        let result = handle.exchange(frame);
        handle.close();
        result
    }
}
