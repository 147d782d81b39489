//! Connected-glyph segmentation
//!
//! The image is scanned column by column (x outer, y inner). Every unvisited
//! ink pixel seeds a breadth-first traversal that collects the connected
//! component containing it. Components are therefore emitted in order of
//! their leftmost column, which is the reading order of a captcha.
//!
//! The traversal queue is bounded. A component whose frontier would grow past
//! the bound aborts segmentation with [`RegionError::QueueOverflow`].

use crate::error::{RegionError, RegionResult};
use crate::ink::InkBand;
use casocr_core::{Box, Pix, Point};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Default capacity of the traversal queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Neighbor offsets for 8-way traversal, in visiting order.
const EIGHT_WAY: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Neighbor offsets for 4-way traversal, in visiting order.
const FOUR_WAY: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Neighbor offsets `(dx, dy)` in the order they are visited.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY,
            ConnectivityType::EightWay => &EIGHT_WAY,
        }
    }
}

/// A connected set of ink pixels.
///
/// Points are stored in discovery order; the seed comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    points: Vec<Point>,
}

impl Blob {
    /// Create a blob from a list of points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of pixels in the blob
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the blob has no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pixels of the blob, in discovery order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Smallest box containing every pixel, or `None` for an empty blob.
    pub fn bounding_box(&self) -> Option<Box> {
        Box::enclosing(self.points.iter().copied())
    }
}

impl FromIterator<Point> for Blob {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Options for segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Energy band classifying a pixel as ink
    pub band: InkBand,
    /// Connectivity type (4-way or 8-way)
    pub connectivity: ConnectivityType,
    /// Maximum number of pending pixels during one traversal
    pub queue_capacity: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            band: InkBand::default(),
            connectivity: ConnectivityType::EightWay,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl SegmentOptions {
    /// Create new options with the specified connectivity
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    /// Set the ink band
    pub fn with_band(mut self, band: InkBand) -> Self {
        self.band = band;
        self
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the traversal queue capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RegionResult<()> {
        if self.queue_capacity == 0 {
            return Err(RegionError::InvalidParameters(
                "queue_capacity must be positive".to_string(),
            ));
        }
        self.band.validate()
    }
}

/// Lazy iterator over the blobs of an image.
///
/// Yields blobs in column-major seed order. After the first error the
/// iterator is exhausted.
#[derive(Debug)]
pub struct Segments<'a> {
    pix: &'a Pix,
    options: SegmentOptions,
    ink: Vec<bool>,
    visited: Vec<bool>,
    queue: VecDeque<Point>,
    cursor: usize,
    done: bool,
}

impl<'a> Segments<'a> {
    /// Prepare segmentation of an image.
    pub fn new(pix: &'a Pix, options: &SegmentOptions) -> RegionResult<Self> {
        options.validate()?;
        let ink = options.band.mask(pix);
        let visited = vec![false; ink.len()];
        Ok(Self {
            pix,
            options: *options,
            ink,
            visited,
            queue: VecDeque::with_capacity(options.queue_capacity),
            cursor: 0,
            done: false,
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.pix.width() as usize + x as usize
    }

    /// Collect the component containing `seed`, which must already be
    /// marked visited.
    fn grow(&mut self, seed: Point) -> RegionResult<Blob> {
        let width = self.pix.width();
        let height = self.pix.height();
        let capacity = self.options.queue_capacity;

        let mut points = Vec::new();
        self.queue.clear();
        self.queue.push_back(seed);

        while let Some(p) = self.queue.pop_front() {
            points.push(p);
            for &(dx, dy) in self.options.connectivity.offsets() {
                let (Some(nx), Some(ny)) = (p.x.checked_add_signed(dx), p.y.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx >= width || ny >= height {
                    continue;
                }
                let idx = self.index(nx, ny);
                if self.visited[idx] || !self.ink[idx] {
                    continue;
                }
                self.visited[idx] = true;
                if self.queue.len() >= capacity {
                    debug!(capacity, x = seed.x, y = seed.y, "segmentation queue overflow");
                    return Err(RegionError::QueueOverflow {
                        capacity,
                        x: seed.x,
                        y: seed.y,
                    });
                }
                self.queue.push_back(Point::new(nx, ny));
            }
        }

        trace!(x = seed.x, y = seed.y, size = points.len(), "blob");
        Ok(Blob::new(points))
    }
}

impl Iterator for Segments<'_> {
    type Item = RegionResult<Blob>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let height = self.pix.height() as usize;
        let total = self.ink.len();

        while self.cursor < total {
            let x = (self.cursor / height) as u32;
            let y = (self.cursor % height) as u32;
            self.cursor += 1;

            let idx = self.index(x, y);
            if self.visited[idx] {
                continue;
            }
            self.visited[idx] = true;
            if !self.ink[idx] {
                continue;
            }

            let result = self.grow(Point::new(x, y));
            if result.is_err() {
                self.done = true;
            }
            return Some(result);
        }

        self.done = true;
        None
    }
}

/// Segment an image into ink blobs.
///
/// Every ink pixel belongs to exactly one returned blob. Blobs are ordered
/// by the column-major position of their seed pixel.
pub fn segment(pix: &Pix, options: &SegmentOptions) -> RegionResult<Vec<Blob>> {
    Segments::new(pix, options)?.collect()
}
