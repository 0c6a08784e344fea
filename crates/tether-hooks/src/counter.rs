use tether_core::{State, remember, use_state};

/// Inclusive bounds for [`use_counter_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterOptions {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl CounterOptions {
    pub fn between(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn normalized(self) -> Self {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) if lo > hi => {
                log::warn!("use_counter: min {lo} is greater than max {hi}; swapping");
                Self {
                    min: Some(hi),
                    max: Some(lo),
                }
            }
            _ => self,
        }
    }

    pub fn clamp(&self, v: i64) -> i64 {
        let v = self.min.map_or(v, |lo| v.max(lo));
        self.max.map_or(v, |hi| v.min(hi))
    }
}

#[derive(Clone)]
pub struct Counter {
    state: State<i64>,
    initial: i64,
    options: CounterOptions,
}

impl Counter {
    pub fn get(&self) -> i64 {
        self.state.get()
    }

    pub fn inc(&self, delta: i64) {
        let next = self.get().saturating_add(delta);
        self.set(next);
    }

    pub fn dec(&self, delta: i64) {
        let next = self.get().saturating_sub(delta);
        self.set(next);
    }

    /// Stores `v` clamped into the bounds.
    pub fn set(&self, v: i64) {
        self.state.set_if_changed(self.options.clamp(v));
    }

    pub fn reset(&self) {
        self.set(self.initial);
    }

    pub fn options(&self) -> CounterOptions {
        self.options
    }
}

pub fn use_counter(initial: i64) -> Counter {
    use_counter_with(initial, CounterOptions::default())
}

/// Counter clamped into `options`. Bounds are taken from the first pass;
/// `min > max` is corrected by swapping them.
pub fn use_counter_with(initial: i64, options: CounterOptions) -> Counter {
    let options = *remember(|| options.normalized());
    let state = use_state(|| options.clamp(initial));
    Counter {
        state,
        initial,
        options,
    }
}
