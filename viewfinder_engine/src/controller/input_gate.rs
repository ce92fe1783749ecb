/// Input gate: lets the controller lock out player input while rewinding.

/// Receiver of input enable/disable requests
pub trait InputGate: Send {
    fn set_input_enabled(&mut self, enabled: bool);
}

/// Gate for hosts without an input layer
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpInputGate;

impl InputGate for NoOpInputGate {
    fn set_input_enabled(&mut self, _enabled: bool) {}
}
