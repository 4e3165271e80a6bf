use kirana::catalog::{filter_products, SearchFilter, StockFilter};
use kirana::compress::{target_dimensions, CompressionPolicy};
use kirana::upload::{jpg_file_name, progress_percent};
use kirana::{demo_products, Category, Product};
use proptest::prelude::*;

proptest! {
    #[test]
    fn policy_accepts_valid_ranges(
        target_kb in 1u64..10_000,
        max_width in 1u32..8192,
        initial in 0.01f32..=1.0,
        step in 0.01f32..=0.5,
        min in 0.01f32..=1.0,
    ) {
        let policy = CompressionPolicy::new(target_kb * 1024, max_width, initial, step, min);
        prop_assert!(policy.is_ok());
        prop_assert!(policy.unwrap().max_attempts() >= 1);
    }

    #[test]
    fn policy_rejects_out_of_range_quality(initial in 1.0001f32..10.0) {
        prop_assert!(CompressionPolicy::new(1024, 500, initial, 0.08, 0.25).is_err());
    }

    #[test]
    fn attempt_bound_matches_formula(
        initial in 0.3f32..=1.0,
        step in 0.01f32..=0.3,
        min in 0.01f32..=0.29,
    ) {
        prop_assume!(min < initial);
        let policy = CompressionPolicy::new(1024, 500, initial, step, min).unwrap();
        let expected = ((initial - min) / step).ceil() as u32 + 1;
        prop_assert_eq!(policy.max_attempts(), expected);
    }

    #[test]
    fn target_dimensions_never_exceed_cap(
        width in 1u32..10_000,
        height in 1u32..10_000,
        max_width in 1u32..4_000,
    ) {
        let (w, h) = target_dimensions(width, height, max_width);
        prop_assert!(w <= max_width.max(width));
        prop_assert!(w <= width, "never upscales width");
        prop_assert!(h <= height.max(1), "never upscales height");
        if width <= max_width {
            prop_assert_eq!((w, h), (width, height));
        } else {
            prop_assert_eq!(w, max_width);
        }
    }

    #[test]
    fn target_dimensions_preserve_aspect_within_rounding(
        width in 501u32..10_000,
        height in 1u32..10_000,
    ) {
        let (w, h) = target_dimensions(width, height, 500);
        let expected = height as f64 * w as f64 / width as f64;
        prop_assert!((h as f64 - expected).abs() <= 1.0);
    }

    #[test]
    fn progress_percent_bounded(total in 1u64..=1_000_000, fraction in 0.0f64..=1.0) {
        let loaded = (fraction * total as f64) as u64;
        let pct = progress_percent(loaded, total);
        prop_assert!(pct <= 100);
    }

    #[test]
    fn progress_percent_monotonic(total in 1u64..=100_000, fa in 0.0f64..=1.0, fb in 0.0f64..=1.0) {
        // Derive both points as fractions of total so a <= b by construction.
        let (lo, hi) = if fa <= fb { (fa, fb) } else { (fb, fa) };
        let a = (lo * total as f64) as u64;
        let b = (hi * total as f64) as u64;
        prop_assert!(a <= b && b <= total);
        prop_assert!(progress_percent(a, total) <= progress_percent(b, total));
    }

    #[test]
    fn jpg_file_name_always_ends_in_jpg(name in "[a-zA-Z0-9_. -]{1,40}") {
        prop_assert!(jpg_file_name(&name).ends_with(".jpg"));
    }

    #[test]
    fn stock_filters_partition_the_catalog(seed in 0u64..1000) {
        // Derive a pseudo-random stock assignment from the seed.
        let mut products = demo_products();
        for (i, p) in products.iter_mut().enumerate() {
            p.in_stock = (seed >> (i % 10)) & 1 == 0;
        }
        let available = filter_products(&products, &SearchFilter {
            stock: StockFilter::Available,
            ..Default::default()
        }).len();
        let unavailable = filter_products(&products, &SearchFilter {
            stock: StockFilter::Unavailable,
            ..Default::default()
        }).len();
        prop_assert_eq!(available + unavailable, products.len());
    }

    #[test]
    fn name_filter_matches_are_substrings(query in "[a-z]{1,6}") {
        let products: Vec<Product> = demo_products();
        let filter = SearchFilter {
            query: Some(query.clone()),
            ..Default::default()
        };
        for hit in filter_products(&products, &filter) {
            prop_assert!(hit.name.to_lowercase().contains(&query));
        }
    }

    #[test]
    fn category_filter_is_exact(idx in 0usize..6) {
        let category = Category::all()[idx];
        let products = demo_products();
        let filter = SearchFilter {
            category: Some(category),
            ..Default::default()
        };
        for hit in filter_products(&products, &filter) {
            prop_assert_eq!(hit.category, category);
        }
    }
}
