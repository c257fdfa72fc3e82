//! Per-pixel depth buffer

use lineforge_core::{try_reserve, Error, Result};

/// Inverse eye-space depth (`1/z`) per pixel, initialised to `+∞`.
///
/// Eye-space depths are negative in front of the camera, so a smaller
/// `1/z` means a nearer sample.
#[derive(Debug, Clone)]
pub struct ZBuffer {
    width: u32,
    height: u32,
    depths: Vec<f64>,
}

impl ZBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = (width as usize).checked_mul(height as usize).ok_or_else(|| {
            Error::ResourceExhausted(format!("z-buffer of {}x{} pixels", width, height))
        })?;
        let mut depths = Vec::new();
        try_reserve(&mut depths, len)?;
        depths.resize(len, f64::INFINITY);
        Ok(Self { width, height, depths })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Stored inverse depth at `(x, y)`, `None` outside the buffer
    pub fn get(&self, x: i64, y: i64) -> Option<f64> {
        self.index(x, y).map(|i| self.depths[i])
    }

    /// Store `inv_z` at `(x, y)` if it is strictly nearer than what is
    /// there. Returns whether the sample won. Samples outside the buffer
    /// never win.
    pub fn test_and_set(&mut self, x: i64, y: i64, inv_z: f64) -> bool {
        match self.index(x, y) {
            Some(i) if inv_z < self.depths[i] => {
                self.depths[i] = inv_z;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let zbuf = ZBuffer::new(3, 2).unwrap();
        assert_eq!(zbuf.get(2, 1), Some(f64::INFINITY));
        assert_eq!(zbuf.get(3, 0), None);
        assert_eq!(zbuf.get(0, -1), None);
    }

    #[test]
    fn test_nearer_wins_ties_keep() {
        let mut zbuf = ZBuffer::new(4, 4).unwrap();
        // z = -10 then z = -2: the nearer one overwrites.
        assert!(zbuf.test_and_set(1, 1, 1.0 / -10.0));
        assert!(zbuf.test_and_set(1, 1, 1.0 / -2.0));
        // Further away loses.
        assert!(!zbuf.test_and_set(1, 1, 1.0 / -5.0));
        // Same depth loses.
        assert!(!zbuf.test_and_set(1, 1, 1.0 / -2.0));
        assert_eq!(zbuf.get(1, 1), Some(-0.5));
    }

    #[test]
    fn test_outside_never_wins() {
        let mut zbuf = ZBuffer::new(2, 2).unwrap();
        assert!(!zbuf.test_and_set(-1, 0, -1.0));
        assert!(!zbuf.test_and_set(0, 2, -1.0));
    }

    #[test]
    fn test_absurd_size_is_resource_exhaustion() {
        let err = ZBuffer::new(u32::MAX, u32::MAX).unwrap_err();
        assert!(err.is_resource_exhausted());
    }
}
