//! Single-flight guard for backend calls started from buttons

use leptos::*;
use std::future::Future;

/// Run `task` unless one is already in flight
///
/// `busy` should be owned by a component that outlives the screens
/// switching underneath it. The flag is cleared with `try_set` so a task
/// finishing after its page unmounted is harmless.
pub fn spawn_guarded<F>(busy: RwSignal<bool>, task: F)
where
    F: Future<Output = ()> + 'static,
{
    if busy.get_untracked() {
        return;
    }
    busy.set(true);
    spawn_local(async move {
        task.await;
        busy.try_set(false);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_second_press_is_ignored_while_busy() {
        let runtime = create_runtime();
        let busy = create_rw_signal(false);
        let runs = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let runs = runs.clone();
            spawn_guarded(busy, async move {
                runs.set(runs.get() + 1);
                TimeoutFuture::new(10).await;
            });
        }
        assert!(busy.get_untracked());

        TimeoutFuture::new(50).await;
        assert_eq!(runs.get(), 1);
        assert!(!busy.get_untracked());
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_finishing_after_dispose_does_not_panic() {
        let runtime = create_runtime();
        let busy = create_rw_signal(false);

        spawn_guarded(busy, TimeoutFuture::new(10));
        busy.dispose();

        TimeoutFuture::new(50).await;
        assert_eq!(busy.try_get_untracked(), None);
        runtime.dispose();
    }
}
