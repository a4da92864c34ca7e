use std::fmt;

use super::RunContainer32;

impl fmt::Debug for RunContainer32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.run_amount() < 16 {
            write!(f, "RunContainer32<{:?}>", self.intervals())
        } else {
            write!(
                f,
                "RunContainer32<{:?} values in {:?} runs between {:?} and {:?}>",
                self.len(),
                self.run_amount(),
                self.intervals[0].start(),
                self.intervals[self.intervals.len() - 1].end() - 1,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short() {
        let container: RunContainer32 = [1, 2, 3, 7].into_iter().collect();
        assert_eq!(format!("{:?}", container), "RunContainer32<[[1, 4), [7, 8)]>");
    }

    #[test]
    fn long() {
        let container: RunContainer32 = (0..40).map(|value| value * 2).collect();
        assert_eq!(
            format!("{:?}", container),
            "RunContainer32<40 values in 40 runs between 0 and 78>"
        );
    }
}
