//! Property tests for the progress tracker and the DDS header decoder.

mod common;

use common::dds_bytes;
use nifopt::services::dds::{
    self, DDSCAPS2_CUBEMAP, DDSPF_A1R5G5B5, DDSPF_A4R4G4B4, DDSPF_A8L8, DDSPF_DX10, DDSPF_L8,
    DDSPF_L16, DDSPF_R5G6B5, DDSPF_R8G8B8, DdsProbe,
};
use nifopt::{PROGRESS_SCALE, ProgressTracker};
use proptest::prelude::*;
use std::io::Cursor;

#[derive(Debug, Clone)]
enum Op {
    Start,
    StartSub(i32, i32),
    Update(f32),
    End,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        (0..=100i32, 0..=100i32).prop_map(|(a, b)| Op::StartSub(a.min(b), a.max(b))),
        (0.0f32..=100.0f32).prop_map(Op::Update),
        Just(Op::End),
    ]
}

proptest! {
    #[test]
    fn prop_displayed_value_stays_on_scale(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut tracker = ProgressTracker::new();
        let mut depth = 0usize;
        for op in ops {
            match op {
                Op::Start => {
                    tracker.start();
                    if depth == 0 {
                        depth = 1;
                    }
                }
                Op::StartSub(min, max) => {
                    tracker.start_sub(min, max);
                    if depth > 0 {
                        depth += 1;
                    }
                }
                Op::Update(percent) => tracker.update(percent, "step"),
                Op::End => {
                    tracker.end();
                    depth = depth.saturating_sub(1);
                }
            }
            prop_assert!(tracker.value() >= 0);
            prop_assert!(tracker.value() <= PROGRESS_SCALE);
            prop_assert_eq!(tracker.depth(), depth);
        }
    }

    #[test]
    fn prop_well_nested_subs_are_lifo(
        pairs in prop::collection::vec((0..=100i32, 0..=100i32), 1..6),
    ) {
        let mut tracker = ProgressTracker::new();
        tracker.start();
        for (a, b) in &pairs {
            tracker.start_sub(*a.min(b), *a.max(b));
        }
        prop_assert_eq!(tracker.depth(), pairs.len() + 1);

        for expected_depth in (1..=pairs.len()).rev() {
            tracker.end();
            prop_assert_eq!(tracker.depth(), expected_depth);
        }

        tracker.end();
        prop_assert!(tracker.is_idle());
        prop_assert_eq!(tracker.value(), PROGRESS_SCALE);
    }

    #[test]
    fn prop_updates_are_monotone_within_a_level(
        mut percents in prop::collection::vec(0.0f32..=100.0f32, 1..20),
    ) {
        percents.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut tracker = ProgressTracker::new();
        tracker.start();
        let mut previous = tracker.value();
        for percent in percents {
            tracker.update(percent, "step");
            prop_assert!(tracker.value() >= previous);
            previous = tracker.value();
        }
    }

    #[test]
    fn prop_probe_is_idempotent_on_arbitrary_bytes(
        bytes in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let first = dds::probe(&mut Cursor::new(&bytes)).unwrap();
        let second = dds::probe(&mut Cursor::new(&bytes)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_valid_headers_decode_faithfully(
        width in any::<u32>(),
        height in any::<u32>(),
        pf_index in 0..8usize,
        cubemap in any::<bool>(),
    ) {
        let formats = [
            DDSPF_R8G8B8,
            DDSPF_L8,
            DDSPF_L16,
            DDSPF_A8L8,
            DDSPF_DX10,
            DDSPF_R5G6B5,
            DDSPF_A1R5G5B5,
            DDSPF_A4R4G4B4,
        ];
        let pf = formats[pf_index];
        let caps2 = if cubemap { DDSCAPS2_CUBEMAP } else { 0 };
        let bytes = dds_bytes(width, height, &pf, caps2);

        let probed = dds::probe(&mut Cursor::new(&bytes)).unwrap();
        let DdsProbe::Parsed(parsed) = probed else {
            prop_assert!(false, "expected parsed header");
            unreachable!();
        };
        prop_assert_eq!(parsed.header.width, width);
        prop_assert_eq!(parsed.header.height, height);
        prop_assert_eq!(parsed.header.pixel_format, pf);
        prop_assert_eq!(parsed.header.is_cubemap(), cubemap);
        // No extension bytes were appended, announced or not.
        prop_assert_eq!(parsed.extended, None);
    }
}
