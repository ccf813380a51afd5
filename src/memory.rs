use zeroize::Zeroize;

/// Pins a buffer holding derived key material in RAM and keeps it out of core dumps.
///
/// Failures are ignored: locking is best effort and an `RLIMIT_MEMLOCK` hit must not
/// turn into a hashing failure.
pub(crate) fn lock(buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }

    #[cfg(unix)]
    unsafe {
        let ptr = buf.as_ptr() as *const libc::c_void;
        let _ = libc::mlock(ptr, buf.len());
        #[cfg(target_os = "linux")]
        let _ = libc::madvise(ptr as *mut libc::c_void, buf.len(), libc::MADV_DONTDUMP);
    }
}

/// Unlocks a buffer taken by [`lock`] and overwrites it with zeroes.
pub(crate) fn release(buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }

    #[cfg(unix)]
    unsafe {
        let _ = libc::munlock(buf.as_ptr() as *const libc::c_void, buf.len());
    }
    buf.zeroize();
}

/// Owned key buffer that is locked on creation and wiped on drop.
pub(crate) struct KeyBuffer {
    bytes: Vec<u8>,
}

impl KeyBuffer {
    pub(crate) fn zeroed(len: usize) -> Self {
        let mut bytes = vec![0u8; len];
        lock(&mut bytes);
        Self { bytes }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Drop for KeyBuffer {
    fn drop(&mut self) {
        release(&mut self.bytes);
    }
}
