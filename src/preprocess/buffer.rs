use ndarray::Array4;

/// Channel count of every buffer: R, G, B.
pub const CHANNELS: usize = 3;

/// A batched pixel tensor of shape `[1, height, width, 3]`, one `u8` per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    data: Array4<u8>,
}

impl PixelBuffer {
    /// Wraps interleaved RGB rows in a leading batch dimension of size 1.
    ///
    /// Returns `None` when `raw` does not hold exactly `height * width * 3`
    /// values.
    pub fn from_rgb(width: u32, height: u32, raw: Vec<u8>) -> Option<PixelBuffer> {
        let shape = (1, height as usize, width as usize, CHANNELS);
        Array4::from_shape_vec(shape, raw).ok().map(|data| PixelBuffer { data })
    }

    /// `[batch, height, width, channels]`.
    pub fn shape(&self) -> [usize; 4] {
        let (n, h, w, c) = self.data.dim();
        [n, h, w, c]
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    /// Number of channel values, batch included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The `[r, g, b]` value at row `y`, column `x`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if y >= self.height() || x >= self.width() {
            return None;
        }
        Some([
            self.data[[0, y, x, 0]],
            self.data[[0, y, x, 1]],
            self.data[[0, y, x, 2]],
        ])
    }

    /// Channel values in row-major `(y, x, channel)` order, widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.data.iter().map(|&v| f64::from(v)).collect()
    }
}
