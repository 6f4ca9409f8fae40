use crate::builder::FixedSizeBinaryBuilder;
use crate::error::DoubleRelease;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;


struct Shared {
    refs: AtomicUsize,
    builder: Mutex<Option<FixedSizeBinaryBuilder>>
}


/// Reference counted builder handle.
///
/// Every holder obtained via [SharedBuilder::new] or [SharedBuilder::retain]
/// calls [SharedBuilder::release] exactly once. The builder and its buffers
/// are freed by the last release. Releases may race from different threads.
pub struct SharedBuilder {
    shared: Arc<Shared>
}


impl SharedBuilder {
    pub fn new(builder: FixedSizeBinaryBuilder) -> Self {
        Self {
            shared: Arc::new(Shared {
                refs: AtomicUsize::new(1),
                builder: Mutex::new(Some(builder))
            })
        }
    }

    pub fn retain(&self) -> SharedBuilder {
        let retained = self.shared.refs.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |refs| (refs > 0).then(|| refs + 1)
        );
        if retained.is_err() {
            panic!("can't retain released builder")
        }
        Self {
            shared: self.shared.clone()
        }
    }

    pub fn ref_count(&self) -> usize {
        self.shared.refs.load(Ordering::Acquire)
    }

    pub fn is_released(&self) -> bool {
        self.ref_count() == 0
    }

    /// Gives up this handle's reference.
    ///
    /// # Panics
    ///
    /// When the reference count is already zero.
    pub fn release(self) {
        let prev = self.shared.refs.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |refs| refs.checked_sub(1)
        );
        match prev {
            Ok(1) => {
                let builder = self.shared.builder.lock().take();
                drop(builder);
                debug!("released fixed size binary builder");
            },
            Ok(_) => {},
            Err(_) => panic!("{}", DoubleRelease)
        }
    }

    /// Runs `f` with exclusive access to the builder.
    ///
    /// # Panics
    ///
    /// When the builder was already released.
    pub fn with<R>(&self, f: impl FnOnce(&mut FixedSizeBinaryBuilder) -> R) -> R {
        let mut lock = self.shared.builder.lock();
        match lock.as_mut() {
            Some(builder) => f(builder),
            None => panic!("builder is used after release")
        }
    }
}
