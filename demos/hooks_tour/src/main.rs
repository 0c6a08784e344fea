use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tether_core::*;
use tether_hooks::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Query {
    term: String,
    page: u32,
}

fn search_panel(storage: Rc<MemoryStorage>) {
    let renders = use_render_count();
    let page = use_counter_with(1, CounterOptions::between(1, 5));
    let saved = use_storage(storage, "last-query", Query {
        term: "rust".into(),
        page: 1,
    });
    let prev_page = use_previous(page.get());

    log::info!(
        "pass {renders}: page {} (was {:?}), saved {:?}",
        page.get(),
        prev_page,
        saved.value()
    );

    let query = Query {
        term: "rust".into(),
        page: page.get() as u32,
    };
    let deps = Value::from_serialize(&query).unwrap_or_default();
    use_deep_compare_effect(Some(deps![deps]), {
        let saved = saved.clone();
        move || {
            log::info!("fetching {query:?}");
            if let Err(e) = saved.set(query) {
                log::error!("could not save query: {e}");
            }
            on_unmount(|| log::info!("cancelling fetch"))
        }
    });

    use_unmount(|| log::info!("search panel gone"));

    // Page forward twice, then settle.
    if renders <= 2 {
        on_commit(move || page.inc(1));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let storage = Rc::new(MemoryStorage::new());
    let mut sched = Scheduler::new();
    let key = {
        let storage = storage.clone();
        sched.mount(move || search_panel(storage.clone()))
    };

    let passes = sched.flush();
    log::info!("settled after {passes} extra passes");
    log::info!("stored: {:?}", storage.raw("last-query"));

    sched.unmount(key);
    anyhow::ensure!(sched.is_empty(), "component still mounted");
    Ok(())
}
