use foundation::time::Time;

/// Metadata for one tick of a render loop.
///
/// `time` is derived from the index rather than the wall clock, so two loops
/// with the same step see the same timeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    /// Nominal step between ticks (seconds).
    pub dt_s: f64,
    pub time: Time,
}

impl Frame {
    pub fn first(dt_s: f64) -> Self {
        Self::at(0, dt_s)
    }

    pub fn at(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self::at(self.index + 1, self.dt_s)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn time_follows_index() {
        let f = Frame::at(30, 1.0 / 60.0);
        assert_eq!(f.time, Time(0.5));
        assert!(!f.is_first());
    }

    #[test]
    fn stepping_from_the_first_frame() {
        let f0 = Frame::first(0.25);
        assert!(f0.is_first());
        let f2 = f0.next().next();
        assert_eq!(f2.index, 2);
        assert_eq!(f2.time.seconds(), 0.5);
        assert_eq!(f2.dt_s, 0.25);
    }
}
