//! Control panel collaborator
//!
//! The UI side of layer activation: each active non-base layer gets an
//! opacity-control affordance (a slider in the reference UI). The bridge
//! keys affordances by layer name through opaque handles instead of
//! relying on widget identity.

/// Opaque handle to a UI control owned by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UiControlHandle(u64);

impl UiControlHandle {
    /// Create a handle from a panel-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id, for panel bookkeeping.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// UI collaborator that materializes and tears down opacity controls.
pub trait ControlPanel {
    /// Create the opacity affordance for a newly activated layer.
    fn create_opacity_control(&mut self, layer: &str) -> UiControlHandle;

    /// Destroy the affordance of a deactivated layer.
    fn destroy_opacity_control(&mut self, control: UiControlHandle);
}

/// Panel that ignores all affordance requests, for headless use.
#[derive(Debug, Default)]
pub struct NullControlPanel {
    next_id: u64,
}

impl NullControlPanel {
    /// Create a no-op panel
    pub fn new() -> Self {
        Self::default()
    }
}

impl ControlPanel for NullControlPanel {
    fn create_opacity_control(&mut self, _layer: &str) -> UiControlHandle {
        let handle = UiControlHandle::new(self.next_id);
        self.next_id += 1;
        handle
    }

    fn destroy_opacity_control(&mut self, _control: UiControlHandle) {}
}
