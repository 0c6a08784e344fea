use tether_core::{State, use_state};

#[derive(Clone)]
pub struct Toggle {
    state: State<bool>,
}

impl Toggle {
    pub fn get(&self) -> bool {
        self.state.get()
    }

    pub fn toggle(&self) {
        self.state.update(|v| *v = !*v);
    }

    pub fn set(&self, on: bool) {
        self.state.set_if_changed(on);
    }
}

pub fn use_toggle(initial: bool) -> Toggle {
    Toggle {
        state: use_state(|| initial),
    }
}
