//! Convolution kernels
//!
//! The two fixed kernels used by the convolution operations. A kernel
//! carries its own center.

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// The 3x3 smoothing kernel `[1 1 1; 1 5 1; 1 1 1] / 13`.
    pub fn smooth() -> Self {
        let mut data = [1.0f32; 9];
        data[4] = 5.0;
        Kernel {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data: data.iter().map(|v| v / 13.0).collect(),
        }
    }

    /// The 4-neighbour Laplacian `[0 1 0; 1 -4 1; 0 1 0]`.
    pub fn laplacian() -> Self {
        Kernel {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data: vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0],
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }
}
