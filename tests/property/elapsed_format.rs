//! Properties of duration and elapsed formatting

use proptest::prelude::*;
use watch_dashboard::elapsed::{elapsed_since_at, format_duration};

fn parse_duration(text: &str) -> i64 {
    text.split(' ')
        .map(|part| {
            let (value, unit) = part.split_at(part.len() - 1);
            let value: i64 = value.parse().unwrap();
            match unit {
                "h" => value * 3600,
                "m" => value * 60,
                "s" => value,
                other => panic!("unexpected unit {}", other),
            }
        })
        .sum()
}

proptest! {
    #[test]
    fn negative_input_formats_as_zero(seconds in i64::MIN..0) {
        prop_assert_eq!(format_duration(seconds), "0s");
    }

    #[test]
    fn shape_follows_magnitude(seconds in 0i64..1_000_000) {
        let text = format_duration(seconds);
        if seconds < 60 {
            prop_assert!(text.ends_with('s') && !text.contains(' '));
            prop_assert_eq!(parse_duration(&text), seconds);
        } else if seconds < 3600 {
            prop_assert!(text.contains("m ") && text.ends_with('s'));
            prop_assert_eq!(parse_duration(&text), seconds);
        } else {
            prop_assert!(text.contains("h ") && text.ends_with('m'));
            // Hours format drops the seconds.
            prop_assert_eq!(parse_duration(&text), seconds - seconds % 60);
        }
    }

    #[test]
    fn elapsed_matches_difference(start in 0i64..2_000_000_000, delta in 0i64..100_000) {
        prop_assert_eq!(
            elapsed_since_at(&start.to_string(), start + delta),
            format_duration(delta)
        );
    }

    #[test]
    fn unparseable_start_is_echoed(text in "[a-z:/ -]{1,20}") {
        prop_assert_eq!(elapsed_since_at(&text, 1_700_000_000), text);
    }
}
