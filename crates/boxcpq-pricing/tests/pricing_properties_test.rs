mod common;

use boxcpq_core::models::{
    BoxSpec, ComplexityPolicy, Dimensions, FinishingOptions, LidStyle, Material, PaperSize,
    ScreenPrint,
};
use boxcpq_core::CpqError;
use boxcpq_pricing::decompose;
use common::{allocation, coefficients};
use proptest::prelude::*;

fn lid_style() -> impl Strategy<Value = LidStyle> {
    prop::sample::select(LidStyle::ALL.to_vec())
}

fn material() -> impl Strategy<Value = Material> {
    prop::sample::select(vec![Material::Cardboard, Material::Acrylic])
}

fn policy() -> impl Strategy<Value = ComplexityPolicy> {
    prop::sample::select(vec![ComplexityPolicy::Ignore, ComplexityPolicy::Apply])
}

prop_compose! {
    fn box_spec()(
        w in 10.0f64..600.0,
        h in 10.0f64..600.0,
        d in 5.0f64..300.0,
        lid_style in lid_style(),
        material in material(),
        quantity in 1u32..5000,
    ) -> BoxSpec {
        BoxSpec::new(Dimensions::new(w, h, d), lid_style, material, quantity)
    }
}

prop_compose! {
    fn finishing()(
        cradle in any::<bool>(),
        niche in any::<bool>(),
        screen in prop::option::of((1u32..6, 1u32..4)),
        digital in prop::option::of(prop::sample::select(vec![PaperSize::A4, PaperSize::A3])),
        hot_glue in any::<bool>(),
        foam_glue in any::<bool>(),
        tape_meters in 0.0f64..10.0,
        rivet_count in 0u32..20,
        markup in 0.0f64..3.0,
    ) -> FinishingOptions {
        FinishingOptions {
            cradle,
            niche: cradle && niche,
            screen_print: screen.map(|(colors, passes)| ScreenPrint::new(colors, passes)),
            digital_print: digital,
            coating: None,
            hot_glue,
            foam_glue,
            tape_meters,
            rivet_count,
            markup,
        }
    }
}

proptest! {
    #[test]
    fn prop_price_invariants(spec in box_spec(), options in finishing(), policy in policy()) {
        let breakdown = decompose(&spec, &options, &coefficients(), &allocation(), policy).unwrap();

        for line in breakdown.cost_lines() {
            prop_assert!(line.amount >= 0.0, "{} was {}", line.key, line.amount);
        }
        prop_assert_eq!(breakdown.unit_cost, breakdown.lines_total());
        prop_assert!(breakdown.unit_price >= breakdown.unit_cost);
        prop_assert_eq!(breakdown.unit_price, breakdown.unit_cost * (1.0 + options.markup));
        prop_assert_eq!(breakdown.total_price, breakdown.unit_price * f64::from(spec.quantity));
    }

    #[test]
    fn prop_exactly_one_material_line(spec in box_spec(), options in finishing()) {
        let breakdown =
            decompose(&spec, &options, &coefficients(), &allocation(), ComplexityPolicy::Ignore)
                .unwrap();

        match spec.material {
            Material::Cardboard => {
                prop_assert!(breakdown.cardboard_cost > 0.0);
                prop_assert_eq!(breakdown.acrylic_cost, 0.0);
            }
            Material::Acrylic => {
                prop_assert!(breakdown.acrylic_cost > 0.0);
                prop_assert_eq!(breakdown.cardboard_cost, 0.0);
                prop_assert_eq!(breakdown.pva_glue_cost, 0.0);
                prop_assert_eq!(breakdown.seam_glue_cost, 0.0);
            }
        }
    }

    #[test]
    fn prop_markup_strictly_increases_price(
        spec in box_spec(),
        options in finishing(),
        extra in 0.01f64..2.0,
    ) {
        let higher = options.clone().with_markup(options.markup + extra);

        let base = decompose(&spec, &options, &coefficients(), &allocation(), ComplexityPolicy::Ignore)
            .unwrap();
        let marked_up = decompose(&spec, &higher, &coefficients(), &allocation(), ComplexityPolicy::Ignore)
            .unwrap();

        prop_assert!(marked_up.unit_price > base.unit_price);
        prop_assert!(marked_up.total_price > base.total_price);
    }

    #[test]
    fn prop_niche_without_cradle_always_fails(spec in box_spec(), options in finishing()) {
        let invalid = FinishingOptions { cradle: false, niche: true, ..options };

        let err = decompose(&spec, &invalid, &coefficients(), &allocation(), ComplexityPolicy::Apply)
            .unwrap_err();
        prop_assert!(
            matches!(err, CpqError::InvalidOptionCombination { .. }),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn prop_non_positive_dimension_always_fails(
        spec in box_spec(),
        bad in -100.0f64..=0.0,
        axis in 0usize..3,
    ) {
        let mut values = spec.dimensions.as_array();
        values[axis] = bad;
        let invalid = BoxSpec {
            dimensions: Dimensions::new(values[0], values[1], values[2]),
            ..spec
        };

        let err = decompose(
            &invalid,
            &FinishingOptions::default(),
            &coefficients(),
            &allocation(),
            ComplexityPolicy::Ignore,
        )
        .unwrap_err();
        prop_assert!(matches!(err, CpqError::InvalidDimension { .. }), "unexpected error: {:?}", err);
    }
}
