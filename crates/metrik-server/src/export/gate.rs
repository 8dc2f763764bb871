use std::sync::Mutex;

/// Cooperative single-flight gate.
///
/// A mutex-guarded boolean: `try_begin` flips it and hands back an RAII
/// permit, and the permit's drop flips it back. At most one permit exists
/// at a time, so at most one export cycle runs at a time.
#[derive(Default)]
pub struct ExportGate {
    busy: Mutex<bool>,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. `None` means a cycle is already running.
    pub fn try_begin(&self) -> Option<ExportPermit<'_>> {
        let mut busy = lock(&self.busy);
        if *busy {
            return None;
        }
        *busy = true;
        Some(ExportPermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        *lock(&self.busy)
    }
}

/// Releases the gate on drop.
pub struct ExportPermit<'a> {
    gate: &'a ExportGate,
}

impl Drop for ExportPermit<'_> {
    fn drop(&mut self) {
        *lock(&self.gate.busy) = false;
    }
}

// The guarded value is a plain bool, safe to reclaim after a panic.
fn lock(busy: &Mutex<bool>) -> std::sync::MutexGuard<'_, bool> {
    busy.lock().unwrap_or_else(|e| e.into_inner())
}
