use std::fmt;

use super::{ArrayStore, BitmapStore, Container, RunStore};

impl fmt::Debug for ArrayStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.len() < 16 {
            write!(f, "ArrayStore<{:?}>", self.as_slice())
        } else {
            write!(
                f,
                "ArrayStore<{:?} values between {:?} and {:?}>",
                self.len(),
                self.min().unwrap_or_default(),
                self.max().unwrap_or_default(),
            )
        }
    }
}

impl fmt::Debug for BitmapStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.has_cached_len() {
            return write!(f, "BitmapStore<unknown length>");
        }
        write!(
            f,
            "BitmapStore<{:?} values between {:?} and {:?}>",
            self.len(),
            self.min().unwrap_or_default(),
            self.max().unwrap_or_default(),
        )
    }
}

impl fmt::Debug for RunStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.run_amount() < 16 {
            write!(f, "RunStore<{:?}>", self.intervals())
        } else {
            write!(
                f,
                "RunStore<{:?} values in {:?} runs between {:?} and {:?}>",
                self.len(),
                self.run_amount(),
                self.min().unwrap_or_default(),
                self.max().unwrap_or_default(),
            )
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Container::Array(array) => fmt::Debug::fmt(array, f),
            Container::Bitmap(bitmap) => fmt::Debug::fmt(bitmap, f),
            Container::Run(run) => fmt::Debug::fmt(run, f),
        }
    }
}
