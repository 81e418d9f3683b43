use std::{
    io,
    mem::{self, MaybeUninit},
    os::fd::{AsRawFd, RawFd},
    ptr,
    sync::atomic::{AtomicBool, Ordering},
};

static INTERRUPT_RECIEVED: AtomicBool = AtomicBool::new(false);

/// Installs a SIGINT handler that only records the signal. The handler is installed without
/// `SA_RESTART`, so a blocking read returns `ErrorKind::Interrupted` and the caller can shut down
/// cleanly.
pub fn set_interrupt_handler() -> io::Result<()> {
    extern "C" fn handle_interrupt(_: libc::c_int) {
        INTERRUPT_RECIEVED.store(true, Ordering::Relaxed);
    }

    let handler: extern "C" fn(libc::c_int) = handle_interrupt;

    unsafe {
        let mut action: libc::sigaction = mem::zeroed();

        action.sa_sigaction = handler as libc::sighandler_t;
        action.sa_flags = 0;
        libc::sigemptyset(&mut action.sa_mask);

        if libc::sigaction(libc::SIGINT, &action, ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(())
}

pub fn interrupted() -> bool {
    INTERRUPT_RECIEVED.load(Ordering::Relaxed)
}

/// Non-canonical, no-echo terminal mode. The previous mode is restored on drop.
pub struct RawMode {
    fd: RawFd,
    original: libc::termios,
}

impl RawMode {
    pub fn enable(fd: &impl AsRawFd) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let mut termios = MaybeUninit::uninit();

        let original = unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                return Err(io::Error::last_os_error());
            }

            termios.assume_init()
        };

        let mut termios = original;
        termios.c_lflag &= !(libc::ECHO | libc::ICANON);

        unsafe {
            if libc::tcsetattr(fd, libc::TCSADRAIN, &termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok(Self { fd, original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        unsafe {
            if libc::tcsetattr(self.fd, libc::TCSADRAIN, &self.original) != 0 {
                log::warn!(
                    "failed to restore terminal mode: {}",
                    io::Error::last_os_error()
                );
            }
        }
    }
}
