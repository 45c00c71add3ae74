/// Tab operations: filtering and sorting by URL

use crate::error::SortError;
use crate::tab_data::{PlanEntry, SortPlan, SortRequest, TabDescriptor};
use crate::url_filter::{normalize_url, UrlFilter};

/// Plan a sort of the movable tabs matching `request`
///
/// Algorithm:
/// 1. Walk `tabs` in order, keeping unpinned visible tabs whose URL matches
///    the filter, and remember the slots they occupy
/// 2. Stable sort the kept tabs by normalized URL (descending if `reverse`)
/// 3. Hand the remembered slots out, in order, to the sorted tabs
///
/// Tabs that are not kept never appear in the plan and their slots are never
/// handed out, so they stay where they are.
pub fn plan(tabs: &[TabDescriptor], request: &SortRequest) -> Result<SortPlan, SortError> {
    let filter = UrlFilter::compile(&request.url_filter)?;

    let mut candidates: Vec<&TabDescriptor> = tabs
        .iter()
        .filter(|tab| tab.is_movable() && filter.matches(&tab.url))
        .collect();
    let slots: Vec<usize> = candidates.iter().map(|tab| tab.position).collect();

    candidates.sort_by(|a, b| {
        let ordering = normalize_url(&a.url).cmp(normalize_url(&b.url));
        if request.reverse { ordering.reverse() } else { ordering }
    });

    let entries: Vec<PlanEntry> = candidates
        .into_iter()
        .zip(slots)
        .map(|(tab, target_position)| PlanEntry {
            tab: tab.clone(),
            target_position,
        })
        .collect();

    log::debug!(
        "Planned sort of {} of {} tabs (filter {:?}, reverse {})",
        entries.len(),
        tabs.len(),
        request.url_filter,
        request.reverse
    );

    Ok(SortPlan { entries })
}

/// Arrangement of tab ids after `plan` has been applied to `tabs`
#[cfg(test)]
pub(crate) fn arrangement_after(tabs: &[TabDescriptor], plan: &SortPlan) -> Vec<i32> {
    let mut by_position: Vec<(usize, i32)> = tabs.iter().map(|tab| (tab.position, tab.id)).collect();
    for entry in plan.iter() {
        if let Some(slot) = by_position.iter_mut().find(|slot| slot.1 == entry.tab.id) {
            slot.0 = entry.target_position;
        }
    }
    by_position.sort_by_key(|(position, _)| *position);
    by_position.into_iter().map(|(_, id)| id).collect()
}
