use crate::config::ComponentWeights;
use crate::error::{Error, Result};
use crate::models::score::clamp_score;
use crate::models::{ComponentKind, ComponentScore, PercentileRank, ScoreBreakdown};

/// Combines exactly one score per component into the weighted final score.
///
/// The configured weight replaces whatever weight a component carries, so the
/// breakdown always reflects the configuration it was aggregated under.
pub fn aggregate(
    components: Vec<ComponentScore>,
    weights: &ComponentWeights,
) -> Result<ScoreBreakdown> {
    let mut slots: [Option<ComponentScore>; 5] = Default::default();

    for mut component in components {
        let index = slot_index(component.kind);
        if slots[index].is_some() {
            return Err(Error::AggregationPrecondition(format!(
                "duplicate {} component",
                component.kind
            )));
        }
        component.weight = weights.get(component.kind);
        slots[index] = Some(component);
    }

    let [activity, documentation, quality, professionalism, impact] = slots;
    let take = |slot: Option<ComponentScore>, kind: ComponentKind| {
        slot.ok_or_else(|| {
            Error::AggregationPrecondition(format!("missing {} component", kind))
        })
    };
    let activity = take(activity, ComponentKind::Activity)?;
    let documentation = take(documentation, ComponentKind::Documentation)?;
    let quality = take(quality, ComponentKind::Quality)?;
    let professionalism = take(professionalism, ComponentKind::Professionalism)?;
    let impact = take(impact, ComponentKind::Impact)?;

    let final_score = clamp_score(
        [&activity, &documentation, &quality, &professionalism, &impact]
            .iter()
            .map(|c| c.score * c.weight)
            .sum::<f64>()
            / 100.0,
    );

    Ok(ScoreBreakdown {
        activity,
        documentation,
        quality,
        professionalism,
        impact,
        final_score,
        percentile_rank: PercentileRank::from_score(final_score),
    })
}

fn slot_index(kind: ComponentKind) -> usize {
    match kind {
        ComponentKind::Activity => 0,
        ComponentKind::Documentation => 1,
        ComponentKind::Quality => 2,
        ComponentKind::Professionalism => 3,
        ComponentKind::Impact => 4,
    }
}
