//! Promotion applicability matching
//!
//! A single pure function decides which promotions apply to the current
//! selection, so the decision table lives in exactly one place and can be
//! tested without any store.

use glasline_domain::constants::SHARED_TARIFF_FAMILY_PREFIX;
use glasline_domain::types::promotion::Promotion;

/// Filter `all` down to the promotions that apply to the given selection.
///
/// Decision per promotion:
/// - globally flagged promotions with no tariff and no building targets
///   always apply, even with nothing selected;
/// - tariff-targeted AND building-targeted: both must match;
/// - only one kind of target: that one must match;
/// - no targets at all: applies only when globally flagged.
///
/// Promotion order is preserved.
pub fn applicable_promotions(
    all: &[Promotion],
    tariff_slug: Option<&str>,
    building_id: Option<&str>,
) -> Vec<Promotion> {
    all.iter().filter(|p| applies(p, tariff_slug, building_id)).cloned().collect()
}

fn applies(promotion: &Promotion, tariff_slug: Option<&str>, building_id: Option<&str>) -> bool {
    // Untargeted global promotions short-circuit before the decision table
    if promotion.is_global
        && !promotion.has_tariff_target()
        && !promotion.has_building_target()
    {
        return true;
    }

    let tariff_ok = matches_tariff(promotion, tariff_slug);
    let building_ok = matches_building(promotion, building_id);

    match (promotion.has_tariff_target(), promotion.has_building_target()) {
        (true, true) => tariff_ok && building_ok,
        (true, false) => tariff_ok,
        (false, true) => building_ok,
        (false, false) => promotion.is_global,
    }
}

fn matches_tariff(promotion: &Promotion, tariff_slug: Option<&str>) -> bool {
    let Some(selected) = tariff_slug else {
        return false;
    };
    promotion
        .target_tariff_slugs
        .iter()
        .any(|target| slugs_match(selected, target))
}

fn matches_building(promotion: &Promotion, building_id: Option<&str>) -> bool {
    let Some(selected) = building_id else {
        return false;
    };
    promotion.building_ids.iter().any(|id| id == selected)
}

/// Slug comparison for tariff targeting.
///
/// Exact equality, or membership in the one shared tariff family: a target
/// inside the `einfach-` family matches every tariff in that family. The
/// prefix must be present literally on both sides; this rule does not
/// generalise to other prefixes.
fn slugs_match(selected: &str, target: &str) -> bool {
    if selected == target {
        return true;
    }
    selected.starts_with(SHARED_TARIFF_FAMILY_PREFIX)
        && target.starts_with(SHARED_TARIFF_FAMILY_PREFIX)
}
