//! Column width resolution for column-flow sections.
//!
//! Turns a mix of fixed, ratio and equal-share column specs into concrete
//! widths. Fixed columns are taken first, ratio columns are sized against
//! what the fixed columns leave, and equal-share columns split the rest.

use crate::error::{LayoutError, Result};
use crate::types::ColumnWidthSpec;

/// Slack allowed when comparing accumulated widths against the usable width.
const WIDTH_TOLERANCE: f32 = 1e-3;

/// Resolve `specs` into one width per column, in column order.
///
/// `usable` is the width available to columns (section width minus insets
/// and inter-item spacing). The returned widths never sum to more than
/// `usable`. If no column is equal-share, leftover width stays unused.
///
/// # Errors
/// Returns a configuration error when fixed widths exceed `usable`, when
/// ratios exceed the fraction left after fixed columns, or when a single
/// spec is malformed.
pub fn resolve_column_widths(
    section: usize,
    usable: f32,
    specs: &[ColumnWidthSpec],
) -> Result<Vec<f32>> {
    let usable = usable.max(0.0);
    let mut fixed_total = 0.0_f32;
    let mut ratio_total = 0.0_f32;
    let mut equal_count = 0_usize;

    for (column, spec) in specs.iter().enumerate() {
        match *spec {
            ColumnWidthSpec::Fixed(width) => {
                if width.is_nan() || width < 0.0 {
                    return Err(LayoutError::InvalidColumnWidth {
                        section,
                        column,
                        reason: format!("fixed width {width} must be a non-negative number"),
                    });
                }
                fixed_total += width;
            }
            ColumnWidthSpec::Ratio(ratio) => {
                if ratio.is_nan() || ratio <= 0.0 || ratio > 1.0 {
                    return Err(LayoutError::InvalidColumnWidth {
                        section,
                        column,
                        reason: format!("ratio {ratio} must be in (0, 1]"),
                    });
                }
                ratio_total += ratio;
            }
            ColumnWidthSpec::EqualShare => equal_count += 1,
        }
    }

    if fixed_total > usable + WIDTH_TOLERANCE {
        return Err(LayoutError::FixedWidthOverflow {
            section,
            fixed: fixed_total,
            usable,
        });
    }

    let remaining = (usable - fixed_total).max(0.0);
    let available_ratio = if usable > 0.0 {
        remaining / usable
    } else {
        0.0
    };
    if usable > 0.0 && ratio_total * usable > remaining + WIDTH_TOLERANCE {
        return Err(LayoutError::RatioOverflow {
            section,
            ratio: ratio_total,
            available: available_ratio,
        });
    }

    let equal_width = if equal_count > 0 {
        ((remaining - ratio_total * remaining) / equal_count as f32).max(0.0)
    } else {
        0.0
    };

    Ok(specs
        .iter()
        .map(|spec| match *spec {
            ColumnWidthSpec::EqualShare => equal_width,
            ColumnWidthSpec::Ratio(ratio) => ratio * remaining,
            ColumnWidthSpec::Fixed(width) => width,
        })
        .collect())
}

/// X offset of every column's left edge, relative to the section's left inset.
pub fn column_offsets(widths: &[f32], inter_item_spacing: f32) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(widths.len());
    let mut x = 0.0_f32;
    for width in widths {
        offsets.push(x);
        x += width + inter_item_spacing;
    }
    offsets
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use test_case::test_case;

    use ColumnWidthSpec::{EqualShare, Fixed, Ratio};

    #[test]
    fn test_mixed_specs() {
        let widths =
            resolve_column_widths(0, 400.0, &[Fixed(100.0), Ratio(0.5), EqualShare]).unwrap();
        assert_eq!(widths, vec![100.0, 150.0, 150.0]);
    }

    #[test]
    fn test_all_equal_share() {
        let widths = resolve_column_widths(0, 400.0, &[EqualShare; 4]).unwrap();
        assert_eq!(widths, vec![100.0; 4]);
    }

    #[test]
    fn test_leftover_unused_without_equal_share() {
        let widths = resolve_column_widths(0, 400.0, &[Fixed(100.0), Ratio(0.5)]).unwrap();
        assert_eq!(widths, vec![100.0, 150.0]);
        assert!(widths.iter().sum::<f32>() < 400.0);
    }

    #[test]
    fn test_no_columns() {
        assert!(resolve_column_widths(0, 400.0, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_fixed_overflow() {
        let err = resolve_column_widths(2, 300.0, &[Fixed(200.0), Fixed(150.0)]).unwrap_err();
        assert!(err.is_configuration());
        match err {
            LayoutError::FixedWidthOverflow {
                section,
                fixed,
                usable,
            } => {
                assert_eq!(section, 2);
                assert_eq!(fixed, 350.0);
                assert_eq!(usable, 300.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ratio_overflow() {
        // Fixed columns leave half of the width, ratios ask for more.
        let err = resolve_column_widths(0, 400.0, &[Fixed(200.0), Ratio(0.75)]).unwrap_err();
        assert!(matches!(err, LayoutError::RatioOverflow { .. }));
    }

    #[test_case(Fixed(-1.0) ; "negative fixed width")]
    #[test_case(Fixed(f32::NAN) ; "nan fixed width")]
    #[test_case(Ratio(0.0) ; "zero ratio")]
    #[test_case(Ratio(1.5) ; "ratio above one")]
    fn test_invalid_spec(spec: ColumnWidthSpec) {
        let err = resolve_column_widths(0, 400.0, &[EqualShare, spec]).unwrap_err();
        match err {
            LayoutError::InvalidColumnWidth { column, .. } => assert_eq!(column, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_offsets_include_spacing() {
        let offsets = column_offsets(&[100.0, 50.0, 25.0], 10.0);
        assert_eq!(offsets, vec![0.0, 110.0, 170.0]);
    }

    /// Small deterministic generator so the sweep below is reproducible.
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn below(&mut self, n: u64) -> u64 {
            self.next() % n
        }
    }

    #[test]
    fn test_widths_never_exceed_usable() {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
        let mut accepted = 0;

        for _ in 0..2000 {
            let usable = 50.0 + rng.below(950) as f32;
            let columns = 1 + rng.below(6) as usize;
            let specs: Vec<ColumnWidthSpec> = (0..columns)
                .map(|_| match rng.below(3) {
                    0 => EqualShare,
                    1 => Ratio((1 + rng.below(40)) as f32 / 100.0),
                    _ => Fixed(rng.below(200) as f32),
                })
                .collect();

            let Ok(widths) = resolve_column_widths(0, usable, &specs) else {
                continue;
            };
            accepted += 1;

            assert_eq!(widths.len(), specs.len());
            let total: f32 = widths.iter().sum();
            assert!(
                total <= usable + 0.01,
                "widths {widths:?} from {specs:?} exceed {usable}"
            );
            if specs.contains(&EqualShare) {
                assert!((total - usable).abs() < 0.01, "equal share left slack");
            }
            assert!(widths.iter().all(|w| *w >= 0.0));
        }

        assert!(accepted > 100);
    }
}
