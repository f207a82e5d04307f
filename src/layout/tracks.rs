use crate::config::RowSizing;

/// Sizing rule for one row or column track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSize {
    /// Absolute size in terminal cells.
    Fixed(u16),
    /// Percentage of the distributable length (1-100).
    Percent(u8),
    /// Proportional share of whatever is left after fixed and percent
    /// tracks are carved out. `Weight(2)` takes twice the space of
    /// `Weight(1)`.
    Weight(u16),
}

impl From<RowSizing> for TrackSize {
    fn from(sizing: RowSizing) -> Self {
        match sizing {
            RowSizing::Weight(weight) => TrackSize::Weight(weight.max(1)),
            RowSizing::Fixed(cells) => TrackSize::Fixed(cells),
        }
    }
}

/// Distribute `total` cells across `tracks`.
///
/// Fixed and percent tracks claim their lengths first; the remainder is
/// split across weight tracks proportionally, with the integer rounding
/// remainder handed out one cell at a time. Over-subscription shrinks
/// percent tracks before fixed ones so the result never exceeds `total`.
pub fn distribute(total: u16, tracks: &[TrackSize]) -> Vec<u16> {
    if tracks.is_empty() {
        return Vec::new();
    }

    let total = total as u32;
    let mut lengths = vec![0u32; tracks.len()];

    for (idx, track) in tracks.iter().enumerate() {
        lengths[idx] = match track {
            TrackSize::Fixed(cells) => *cells as u32,
            TrackSize::Percent(percent) => {
                (total as f32 * (*percent).min(100) as f32 / 100.0).round() as u32
            }
            TrackSize::Weight(_) => 0,
        };
    }

    let mut used: u32 = lengths.iter().sum();
    if used > total {
        shrink(&mut lengths, tracks, used - total);
        used = lengths.iter().sum();
    }

    let remaining = total.saturating_sub(used);
    if remaining > 0 {
        grow_weights(&mut lengths, tracks, remaining);
    }

    lengths
        .into_iter()
        .map(|length| length.min(u16::MAX as u32) as u16)
        .collect()
}

fn shrink(lengths: &mut [u32], tracks: &[TrackSize], mut over: u32) {
    let passes: [fn(&TrackSize) -> bool; 2] = [
        |track| matches!(track, TrackSize::Percent(_)),
        |track| matches!(track, TrackSize::Fixed(_)),
    ];

    for eligible in passes {
        while over > 0 {
            let mut changed = false;
            for (idx, track) in tracks.iter().enumerate() {
                if eligible(track) && lengths[idx] > 0 {
                    lengths[idx] -= 1;
                    over -= 1;
                    changed = true;
                    if over == 0 {
                        return;
                    }
                }
            }
            if !changed {
                break;
            }
        }
    }
}

fn grow_weights(lengths: &mut [u32], tracks: &[TrackSize], remaining: u32) {
    let weight_of = |track: &TrackSize| match track {
        TrackSize::Weight(weight) => (*weight).max(1) as u32,
        _ => 0,
    };

    let total_weight: u32 = tracks.iter().map(weight_of).sum();
    if total_weight == 0 {
        return;
    }

    let mut leftover = remaining;
    for (idx, track) in tracks.iter().enumerate() {
        let weight = weight_of(track);
        if weight == 0 {
            continue;
        }
        let share = (remaining * weight) / total_weight;
        let addition = share.min(leftover);
        lengths[idx] += addition;
        leftover -= addition;
    }

    // Rounding remainder goes to weight tracks one cell at a time.
    let mut idx = 0;
    while leftover > 0 {
        if weight_of(&tracks[idx % tracks.len()]) > 0 {
            lengths[idx % tracks.len()] += 1;
            leftover -= 1;
        }
        idx += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_weight_takes_everything() {
        assert_eq!(distribute(80, &[TrackSize::Weight(1)]), vec![80]);
    }

    #[test]
    fn fixed_percent_weight_mix() {
        let widths = distribute(
            100,
            &[
                TrackSize::Fixed(20),
                TrackSize::Percent(25),
                TrackSize::Weight(1),
            ],
        );
        assert_eq!(widths, vec![20, 25, 55]);
    }

    #[test]
    fn weights_split_proportionally_with_remainder() {
        let widths = distribute(10, &[TrackSize::Weight(1), TrackSize::Weight(2)]);
        assert_eq!(widths.iter().sum::<u16>(), 10);
        assert_eq!(widths, vec![4, 6]);
    }

    #[test]
    fn oversubscribed_fixed_tracks_are_shrunk_to_fit() {
        let widths = distribute(10, &[TrackSize::Fixed(8), TrackSize::Fixed(8)]);
        assert_eq!(widths.iter().sum::<u16>(), 10);
    }

    #[test]
    fn percent_shrinks_before_fixed() {
        let widths = distribute(10, &[TrackSize::Fixed(8), TrackSize::Percent(50)]);
        assert_eq!(widths[0], 8);
        assert_eq!(widths.iter().sum::<u16>(), 10);
    }

    #[test]
    fn row_sizing_converts_to_tracks() {
        assert_eq!(TrackSize::from(RowSizing::Weight(2)), TrackSize::Weight(2));
        assert_eq!(TrackSize::from(RowSizing::Fixed(120)), TrackSize::Fixed(120));
    }

    #[test]
    fn empty_track_list_yields_nothing() {
        assert!(distribute(40, &[]).is_empty());
    }
}
