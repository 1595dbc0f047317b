//! Depth field of the model domain.

use log::debug;

use crate::error::{BalanceError, BalanceResult};

/// An immutable 2D field of water depths, one value per grid point.
///
/// A depth of `0` marks land; any positive depth marks ocean. Row `0` is the
/// southern edge. The rectangle queries below clamp their arguments to the
/// field, so callers may probe regions that hang over an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topography {
    width: i32,
    height: i32,
    min_depth: i32,
    max_depth: i32,
    data: Vec<i32>,
}

impl Topography {
    /// Wraps a row-major depth vector of `width * height` values.
    pub fn new(width: i32, height: i32, data: Vec<i32>) -> BalanceResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(BalanceError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(BalanceError::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mut min_depth = i32::MAX;
        let mut max_depth = i32::MIN;
        let mut ocean = 0usize;
        for &v in &data {
            min_depth = min_depth.min(v);
            max_depth = max_depth.max(v);
            if v > 0 {
                ocean += 1;
            }
        }
        debug!(
            "topography {}x{}: {} ocean points, depth range {}..={}",
            width, height, ocean, min_depth, max_depth
        );

        Ok(Self {
            width,
            height,
            min_depth,
            max_depth,
            data,
        })
    }

    /// Width in grid points.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in grid points.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Smallest depth in the field.
    pub fn min_depth(&self) -> i32 {
        self.min_depth
    }

    /// Largest depth in the field.
    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    /// Depth at `(x, y)`.
    ///
    /// Panics if `(x, y)` lies outside the field.
    pub fn get(&self, x: i32, y: i32) -> i32 {
        assert!(
            x >= 0 && x < self.width && y >= 0 && y < self.height,
            "point ({}, {}) outside {}x{} topography",
            x,
            y,
            self.width,
            self.height,
        );
        self.data[(y * self.width + x) as usize]
    }

    /// Sum of depths over the rectangle of `w`x`h` points anchored at
    /// `(x, y)`, clamped to the field.
    pub fn rectangle_sum(&self, x: i32, y: i32, w: i32, h: i32) -> i32 {
        let mut sum = 0;
        for j in y.max(0)..(y + h).min(self.height) {
            for i in x.max(0)..(x + w).min(self.width) {
                sum += self.data[(j * self.width + i) as usize];
            }
        }
        sum
    }

    /// Largest depth over the clamped rectangle, or `i32::MIN` if the
    /// rectangle lies entirely outside the field.
    pub fn rectangle_max(&self, x: i32, y: i32, w: i32, h: i32) -> i32 {
        let mut max = i32::MIN;
        for j in y.max(0)..(y + h).min(self.height) {
            for i in x.max(0)..(x + w).min(self.width) {
                max = max.max(self.data[(j * self.width + i) as usize]);
            }
        }
        max
    }

    /// Mean depth over the clamped rectangle, rounded toward zero, or `0`
    /// if the rectangle lies entirely outside the field.
    pub fn rectangle_average(&self, x: i32, y: i32, w: i32, h: i32) -> i32 {
        let mut sum = 0i64;
        let mut count = 0i64;
        for j in y.max(0)..(y + h).min(self.height) {
            for i in x.max(0)..(x + w).min(self.width) {
                sum += i64::from(self.data[(j * self.width + i) as usize]);
                count += 1;
            }
        }
        if count == 0 {
            0
        } else {
            (sum / count) as i32
        }
    }

    /// Number of ocean points in the clamped rectangle.
    pub fn rectangle_work(&self, x: i32, y: i32, w: i32, h: i32) -> i32 {
        let mut work = 0;
        for j in y.max(0)..(y + h).min(self.height) {
            for i in x.max(0)..(x + w).min(self.width) {
                if self.data[(j * self.width + i) as usize] > 0 {
                    work += 1;
                }
            }
        }
        work
    }

    /// Down-scaled copy in which each point holds the depth sum over a
    /// `factor_x`x`factor_y` rectangle of this field.
    ///
    /// The factors must evenly divide the dimensions.
    pub fn scaled_down(&self, factor_x: i32, factor_y: i32) -> BalanceResult<Self> {
        if factor_x <= 0 || factor_y <= 0 {
            return Err(BalanceError::InvalidDimensions {
                width: factor_x,
                height: factor_y,
            });
        }
        if self.width % factor_x != 0 || self.height % factor_y != 0 {
            return Err(BalanceError::BlockSizeMismatch {
                topography_width: self.width,
                topography_height: self.height,
                block_width: factor_x,
                block_height: factor_y,
            });
        }

        let width = self.width / factor_x;
        let height = self.height / factor_y;
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(self.rectangle_sum(x * factor_x, y * factor_y, factor_x, factor_y));
            }
        }
        Self::new(width, height, data)
    }
}
