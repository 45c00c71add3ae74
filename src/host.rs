/// Host side of the `sorttabs` command: applying plans and the extension lifecycle

use serde::{Deserialize, Serialize};

use crate::command::{parse_invocation, CommandSpec, COMPLETION_MESSAGE, SORTTABS_COMMAND};
use crate::error::CommandError;
use crate::operations;
use crate::tab_data::{SortPlan, SortRequest, TabDescriptor};

/// The browser runtime owning the tabs of the active window
pub trait TabHost {
    /// Snapshot of every tab in the window, in tab strip order
    fn tabs(&self) -> Vec<TabDescriptor>;

    /// Move a tab so it ends up at `index`: the tab is taken out of the strip
    /// and inserted again, shifting the tabs in between by one.
    fn move_tab(&mut self, tab_id: i32, index: usize) -> Result<(), String>;
}

/// The host's command registry (the developer toolbar command line)
pub trait CommandRegistry {
    fn add_command(&mut self, spec: &CommandSpec) -> Result<(), String>;

    fn remove_command(&mut self, name: &str) -> Result<(), String>;
}

/// One call to [`TabHost::move_tab`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabMove {
    pub tab_id: i32,
    pub index: usize,
}

/// Expand a plan into host moves, in plan order
///
/// Each entry swaps its tab with whatever currently sits in the target slot.
/// A swap takes two remove/insert moves: the first puts the tab in place and
/// shifts the tabs between the two slots, the second carries the displaced
/// tab back to the vacated slot, which undoes the shift. Tabs outside the plan
/// therefore end where they started, even when they sit between two slots.
///
/// `snapshot` must be the whole window, so tab positions are strip indices.
pub fn placement_moves(plan: &SortPlan, snapshot: &[TabDescriptor]) -> Vec<TabMove> {
    let mut strip: Vec<&TabDescriptor> = snapshot.iter().collect();
    strip.sort_by_key(|tab| tab.position);
    let mut strip: Vec<i32> = strip.into_iter().map(|tab| tab.id).collect();

    let mut moves = Vec::new();
    for entry in plan.iter() {
        let target = entry.target_position;
        let Some(current) = strip.iter().position(|id| *id == entry.tab.id) else {
            log::warn!("Tab {} is not in the window snapshot, skipping", entry.tab.id);
            continue;
        };
        if current == target {
            continue;
        }
        let Some(&displaced) = strip.get(target) else {
            log::warn!("Slot {} is outside the window, skipping tab {}", target, entry.tab.id);
            continue;
        };

        moves.push(TabMove {
            tab_id: entry.tab.id,
            index: target,
        });
        // Neighbours are swapped by the first move alone
        if current.abs_diff(target) > 1 {
            moves.push(TabMove {
                tab_id: displaced,
                index: current,
            });
        }
        strip.swap(current, target);
    }
    moves
}

/// Apply `plan` to the live host, one move at a time
///
/// The first failing move aborts the rest. Returns the number of moves made.
pub fn apply_plan<H: TabHost + ?Sized>(
    host: &mut H,
    snapshot: &[TabDescriptor],
    plan: &SortPlan,
) -> Result<usize, CommandError> {
    let moves = placement_moves(plan, snapshot);

    for (done, tab_move) in moves.iter().enumerate() {
        log::debug!("Moving tab {} to {}", tab_move.tab_id, tab_move.index);
        host.move_tab(tab_move.tab_id, tab_move.index)
            .map_err(|message| {
                log::error!(
                    "Sort aborted after {} of {} moves: {}",
                    done,
                    moves.len(),
                    message
                );
                CommandError::Host {
                    tab_id: tab_move.tab_id,
                    index: tab_move.index,
                    message,
                }
            })?;
    }

    Ok(moves.len())
}

/// Run `sorttabs` against the host and return its status message
pub fn execute<H: TabHost + ?Sized>(host: &mut H, request: &SortRequest) -> Result<String, CommandError> {
    let snapshot = host.tabs();
    let plan = operations::plan(&snapshot, request)?;
    if plan.is_identity() {
        log::info!("{} tabs already sorted", plan.len());
        return Ok(COMPLETION_MESSAGE.to_string());
    }
    let moved = apply_plan(host, &snapshot, &plan)?;

    log::info!("Sorted {} tabs with {} moves", plan.len(), moved);
    Ok(COMPLETION_MESSAGE.to_string())
}

/// Why the extension is being shut down, with the host's numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    AppShutdown = 2,
    AddonDisable = 4,
    AddonUninstall = 6,
    AddonUpgrade = 7,
    AddonDowngrade = 8,
}

impl ShutdownReason {
    pub fn from_code(code: u32) -> Option<ShutdownReason> {
        match code {
            2 => Some(ShutdownReason::AppShutdown),
            4 => Some(ShutdownReason::AddonDisable),
            6 => Some(ShutdownReason::AddonUninstall),
            7 => Some(ShutdownReason::AddonUpgrade),
            8 => Some(ShutdownReason::AddonDowngrade),
            _ => None,
        }
    }
}

/// A started extension, holding the `sorttabs` registration
#[derive(Debug)]
pub struct SortTabsExtension {
    spec: CommandSpec,
}

impl SortTabsExtension {
    /// Register `sorttabs` with the host
    pub fn startup<R: CommandRegistry + ?Sized>(registry: &mut R) -> Result<SortTabsExtension, CommandError> {
        let spec = SORTTABS_COMMAND;
        registry
            .add_command(&spec)
            .map_err(|message| CommandError::Registry {
                name: spec.name.to_string(),
                message,
            })?;

        log::info!("Registered command {}", spec.name);
        Ok(SortTabsExtension { spec })
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Execute a typed command line such as `sorttabs github --reverse`
    pub fn run<H: TabHost + ?Sized>(&self, host: &mut H, line: &str) -> Result<String, CommandError> {
        let request = parse_invocation(line)?;
        execute(host, &request)
    }

    /// Unregister the command, unless the whole application is going away
    ///
    /// Returns whether the command was removed.
    pub fn shutdown<R: CommandRegistry + ?Sized>(
        self,
        registry: &mut R,
        reason: ShutdownReason,
    ) -> Result<bool, CommandError> {
        if reason == ShutdownReason::AppShutdown {
            return Ok(false);
        }

        registry
            .remove_command(self.spec.name)
            .map_err(|message| CommandError::Registry {
                name: self.spec.name.to_string(),
                message,
            })?;

        log::info!("Unregistered command {} ({:?})", self.spec.name, reason);
        Ok(true)
    }
}
