//! Region selection masks and the ordered region sequences cursors return.

use std::ops::Index;

use laff_view::{LaffError, Result, View};
use smallvec::SmallVec;

/// Bitmask choosing which named regions a partition step returns.
///
/// One bit per region. The highest bit of the cursor's width names the first
/// region in declared order and bit 0 the last, so `0b10` on a two-way cursor
/// selects the head and `0b01` the tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Filter {
    mask: u8,
    width: u32,
}

impl Filter {
    /// Head (top/left) region of a two-way cursor.
    pub const HEAD: u8 = 0b10;
    /// Tail (bottom/right) region of a two-way cursor.
    pub const TAIL: u8 = 0b01;

    /// Six-way: rows above the active row band, from the active column rightwards.
    pub const ABOVE: u8 = 0b10_0000;
    /// Six-way: columns left of the active column band, from the active row down.
    pub const LEFT: u8 = 0b01_0000;
    /// Six-way: diagonal block at `(k, k)`.
    pub const CORNER: u8 = 0b00_1000;
    /// Six-way: band below the corner.
    pub const COLUMN_STRIP: u8 = 0b00_0100;
    /// Six-way: band right of the corner.
    pub const ROW_STRIP: u8 = 0b00_0010;
    /// Six-way: block below and right of the corner.
    pub const TRAILING: u8 = 0b00_0001;

    /// Region count of a two-way cursor.
    pub const TWO_WAY: u32 = 2;
    /// Region count of a six-way cursor.
    pub const SIX_WAY: u32 = 6;

    /// Build a mask over `width` regions.
    pub fn new(mask: u8, width: u32) -> Result<Self> {
        if width > u8::BITS || (width < u8::BITS && mask >> width != 0) {
            return Err(LaffError::InvalidFilter { mask, width });
        }
        Ok(Self { mask, width })
    }

    /// Mask selecting every one of `width` regions.
    pub fn all(width: u32) -> Self {
        let width = width.min(u8::BITS);
        let mask = if width == u8::BITS {
            u8::MAX
        } else {
            (1u8 << width) - 1
        };
        Self { mask, width }
    }

    #[inline]
    pub fn mask(&self) -> u8 {
        self.mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of regions a step returns under this mask.
    #[inline]
    pub fn count(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Whether the region at `position` (in declared order) is selected.
    #[inline]
    pub fn selects(&self, position: usize) -> bool {
        (position as u32) < self.width && self.mask & (1 << (self.width - 1 - position as u32)) != 0
    }

    /// Union of two masks over the same regions.
    pub fn union(self, other: Filter) -> Result<Filter> {
        if self.width != other.width {
            return Err(LaffError::InvalidFilter {
                mask: other.mask,
                width: self.width,
            });
        }
        Ok(Filter {
            mask: self.mask | other.mask,
            width: self.width,
        })
    }

    /// Keep the selected regions of a full step, in declared order.
    pub(crate) fn select<T, const N: usize>(&self, regions: [View<T>; N]) -> Regions<T> {
        debug_assert_eq!(N as u32, self.width);
        let views = regions
            .into_iter()
            .enumerate()
            .filter(|(position, _)| self.selects(*position))
            .map(|(_, view)| view)
            .collect();
        Regions { views }
    }
}

/// The regions one partition step returns, in the cursor's declared order.
///
/// Unpack with [`Regions::into_array`] for a fixed number of regions:
///
/// ```rust
/// use laff::{part_by_row_tb, View};
///
/// let v = View::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4, 1]).unwrap();
/// let [top, bottom] = part_by_row_tb(&v, 1, 0b11).unwrap().into_array().unwrap();
/// assert_eq!(top.to_vec(), vec![1.0]);
/// assert_eq!(bottom.to_vec(), vec![2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Regions<T> {
    views: SmallVec<[View<T>; 6]>,
}

impl<T> Regions<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&View<T>> {
        self.views.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, View<T>> {
        self.views.iter()
    }

    pub fn into_vec(self) -> Vec<View<T>> {
        self.views.into_vec()
    }

    /// Unpack into exactly `K` views.
    ///
    /// Fails with `ShapeMismatch` when the filter selected a different count.
    pub fn into_array<const K: usize>(self) -> Result<[View<T>; K]> {
        let n = self.views.len();
        self.views
            .into_vec()
            .try_into()
            .map_err(|_| LaffError::ShapeMismatch(vec![n], vec![K]))
    }

    /// `self` followed by `other`.
    pub(crate) fn concat(mut self, other: Regions<T>) -> Regions<T> {
        self.views.extend(other.views);
        self
    }
}

impl<T> Index<usize> for Regions<T> {
    type Output = View<T>;

    fn index(&self, i: usize) -> &View<T> {
        &self.views[i]
    }
}

impl<T> IntoIterator for Regions<T> {
    type Item = View<T>;
    type IntoIter = smallvec::IntoIter<[View<T>; 6]>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Regions<T> {
    type Item = &'a View<T>;
    type IntoIter = std::slice::Iter<'a, View<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views(n: usize) -> [View<f64>; 6] {
        std::array::from_fn(|i| View::from_vec(vec![i as f64; n], &[1, n]).unwrap())
    }

    #[test]
    fn test_new_rejects_bits_beyond_width() {
        assert!(Filter::new(0b11, 2).is_ok());
        assert!(matches!(
            Filter::new(0b100, 2),
            Err(LaffError::InvalidFilter { mask: 0b100, width: 2 })
        ));
        assert!(Filter::new(0b11_1111, 6).is_ok());
        assert!(Filter::new(0b100_0000, 6).is_err());
    }

    #[test]
    fn test_all() {
        assert_eq!(Filter::all(2).mask(), 0b11);
        assert_eq!(Filter::all(6).mask(), 0b11_1111);
        assert_eq!(Filter::all(8).mask(), u8::MAX);
    }

    #[test]
    fn test_selects_declared_order() {
        let f = Filter::new(Filter::HEAD, 2).unwrap();
        assert!(f.selects(0));
        assert!(!f.selects(1));
        assert!(!f.selects(2));

        let f = Filter::new(Filter::CORNER | Filter::TRAILING, 6).unwrap();
        let picked: Vec<usize> = (0..6).filter(|&p| f.selects(p)).collect();
        assert_eq!(picked, vec![2, 5]);
        assert_eq!(f.count(), 2);
    }

    #[test]
    fn test_select_keeps_order() {
        let f = Filter::new(0b10_1011, 6).unwrap();
        let regions = f.select(views(1));
        let tags: Vec<f64> = regions.iter().map(|v| v.vget(0).unwrap()).collect();
        assert_eq!(tags, vec![0.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_union_matches_combined_select() {
        let m1 = Filter::new(Filter::CORNER, 6).unwrap();
        let m2 = Filter::new(Filter::TRAILING | Filter::ABOVE, 6).unwrap();
        let both = m1.union(m2).unwrap();

        let mut separate: Vec<f64> = m1
            .select(views(1))
            .into_iter()
            .chain(m2.select(views(1)))
            .map(|v| v.vget(0).unwrap())
            .collect();
        separate.sort_by(f64::total_cmp);
        let combined: Vec<f64> = both
            .select(views(1))
            .iter()
            .map(|v| v.vget(0).unwrap())
            .collect();
        assert_eq!(separate, combined);

        assert!(m1.union(Filter::all(2)).is_err());
    }

    #[test]
    fn test_into_array_arity() {
        let f = Filter::new(Filter::ROW_STRIP | Filter::TRAILING, 6).unwrap();
        let [a, b] = f.select(views(2)).into_array().unwrap();
        assert_eq!(a.vget(0).unwrap(), 4.0);
        assert_eq!(b.vget(1).unwrap(), 5.0);

        let wrong: Result<[View<f64>; 3]> = f.select(views(2)).into_array();
        assert!(matches!(wrong, Err(LaffError::ShapeMismatch(_, _))));
    }

    #[test]
    fn test_empty_selection() {
        let f = Filter::new(0, 6).unwrap();
        let regions = f.select(views(1));
        assert!(regions.is_empty());
        let none: [View<f64>; 0] = regions.into_array().unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_concat_and_index() {
        let f = Filter::new(Filter::CORNER, 6).unwrap();
        let g = Filter::new(Filter::LEFT, 6).unwrap();
        let joined = f.select(views(1)).concat(g.select(views(1)));
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].vget(0).unwrap(), 2.0);
        assert_eq!(joined[1].vget(0).unwrap(), 1.0);
        assert!(joined.get(2).is_none());
    }
}
