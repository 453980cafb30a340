// No-alloc fmt::Write buffer for numbers and short labels.
// Silently truncates on overflow.

pub struct StackFmt<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> StackFmt<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl<const N: usize> core::fmt::Write for StackFmt<N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let n = bytes.len().min(N - self.len);
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StackFmt;
    use core::fmt::Write;

    #[test]
    fn formats_decimal() {
        let mut s = StackFmt::<10>::new();
        write!(s, "{}", 4_294_967_295u32).unwrap();
        assert_eq!(s.as_str(), "4294967295");
    }

    #[test]
    fn truncates_when_full() {
        let mut s = StackFmt::<4>::new();
        write!(s, "testing").unwrap();
        assert_eq!(s.as_str(), "test");
        write!(s, "{}", 1).unwrap();
        assert_eq!(s.as_str(), "test");
    }
}
