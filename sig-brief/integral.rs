use sig_core::BinaryImage;

/// Summed-area table with a zero first row and column
pub(crate) struct IntegralImage {
    width: usize,
    height: usize,
    sums: Vec<u64>,
}

impl IntegralImage {
    pub(crate) fn new(img: &BinaryImage) -> Self {
        let (width, height) = img.dimensions();
        let stride = width + 1;
        let mut sums = vec![0u64; stride * (height + 1)];
        for y in 0..height {
            let mut row = 0u64;
            for x in 0..width {
                row += img.get(x, y) as u64;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row;
            }
        }
        Self { width, height, sums }
    }

    /// Sum over the (2 * half + 1)^2 box centred at (x, y), clipped to the image
    pub(crate) fn box_sum(&self, x: i64, y: i64, half: i64) -> u64 {
        let x0 = (x - half).clamp(0, self.width as i64) as usize;
        let y0 = (y - half).clamp(0, self.height as i64) as usize;
        let x1 = (x + half + 1).clamp(0, self.width as i64) as usize;
        let y1 = (y + half + 1).clamp(0, self.height as i64) as usize;
        let stride = self.width + 1;
        self.sums[y1 * stride + x1] + self.sums[y0 * stride + x0]
            - self.sums[y0 * stride + x1]
            - self.sums[y1 * stride + x0]
    }
}
