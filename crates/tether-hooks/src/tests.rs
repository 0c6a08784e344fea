#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;

    use tether_core::{Component, Dispose, Scheduler, Value, deps, on_unmount};

    use crate::*;

    type Log = Rc<RefCell<Vec<String>>>;

    fn new_log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn push(log: &Log, s: impl Into<String>) {
        log.borrow_mut().push(s.into());
    }

    #[test]
    fn test_counter_clamps_and_resets() {
        let c = Component::new();
        let counter = c.render(|| use_counter_with(12, CounterOptions::between(0, 10)));
        assert_eq!(counter.get(), 10);

        counter.dec(3);
        assert_eq!(counter.get(), 7);
        counter.inc(100);
        assert_eq!(counter.get(), 10);
        counter.set(-4);
        assert_eq!(counter.get(), 0);
        counter.reset();
        assert_eq!(counter.get(), 10);
        assert!(c.is_dirty());
    }

    #[test]
    fn test_counter_at_bound_does_not_rerender() {
        let c = Component::new();
        let counter = c.render(|| use_counter_with(5, CounterOptions::between(0, 5)));
        counter.inc(1);
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_counter_swaps_inverted_bounds() {
        let c = Component::new();
        let counter = c.render(|| {
            use_counter_with(
                50,
                CounterOptions {
                    min: Some(10),
                    max: Some(1),
                },
            )
        });
        assert_eq!(counter.options(), CounterOptions::between(1, 10));
        assert_eq!(counter.get(), 10);
    }

    #[test]
    fn test_unbounded_counter_saturates() {
        let c = Component::new();
        let counter = c.render(|| use_counter(i64::MAX - 1));
        counter.inc(5);
        assert_eq!(counter.get(), i64::MAX);
    }

    #[test]
    fn test_counter_survives_passes() {
        let c = Component::new();
        let counter = c.render(|| use_counter(0));
        counter.inc(2);
        let seen = c.render(|| use_counter(0).get());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_toggle() {
        let c = Component::new();
        let t = c.render(|| use_toggle(false));
        t.toggle();
        assert!(t.get());
        assert!(c.render(|| use_toggle(false).get()));

        t.set(true);
        assert!(!c.is_dirty());
        t.set(false);
        assert!(!t.get());
        assert!(c.is_dirty());
    }

    #[test]
    fn test_list_operations() {
        let c = Component::new();
        let list = c.render(|| use_list(vec![3, 1, 2]));

        list.push(4);
        list.insert_at(0, 0);
        list.insert_at(99, 5);
        assert_eq!(list.get(), vec![0, 3, 1, 2, 4, 5]);

        assert!(list.update_at(1, 30));
        assert!(!list.update_at(42, 0));
        assert_eq!(list.remove_at(0), Some(0));
        assert_eq!(list.remove_at(42), None);
        assert_eq!(list.get(), vec![30, 1, 2, 4, 5]);

        list.filter(|x| *x != 2);
        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(list.get(), vec![30, 5, 4, 1]);

        assert_eq!(list.update_where(|x| *x < 5, 0), 2);
        assert!(list.update_first(|x| *x == 0, 7));
        assert!(!list.update_first(|x| *x == 100, 7));
        assert_eq!(list.get(), vec![30, 5, 7, 0]);

        list.upsert(|x| *x == 5, 50);
        list.upsert(|x| *x == 6, 6);
        assert_eq!(list.get(), vec![30, 50, 7, 0, 6]);
        assert_eq!(list.len(), 5);

        list.clear();
        assert!(list.is_empty());
        list.reset();
        assert_eq!(list.get(), vec![3, 1, 2]);
    }

    #[test]
    fn test_list_noop_does_not_rerender() {
        let c = Component::new();
        let list = c.render(|| use_list(Vec::<u8>::new()));
        list.clear();
        list.filter(|_| true);
        list.update_at(0, 1);
        assert!(!c.is_dirty());
        list.push(1);
        assert!(c.is_dirty());
    }

    #[test]
    fn test_list_reset_uses_first_pass_value() {
        let c = Component::new();
        let list = c.render(|| use_list(vec!["a"]));
        list.push("b");
        let list = c.render(|| use_list(vec!["ignored"]));
        assert_eq!(list.get(), vec!["a", "b"]);
        list.reset();
        assert_eq!(list.with(|xs| xs.to_vec()), vec!["a"]);
    }

    #[test]
    fn test_map_operations() {
        let c = Component::new();
        let initial: HashMap<String, u32> = [("a".to_string(), 1)].into_iter().collect();
        let map = c.render(|| use_map(initial.clone()));

        map.set("b".into(), 2);
        assert_eq!(map.get(&"b".into()), Some(2));
        assert!(map.contains(&"a".into()));
        assert_eq!(map.len(), 2);

        assert_eq!(map.remove(&"a".into()), Some(1));
        assert_eq!(map.remove(&"zzz".into()), None);
        assert_eq!(map.snapshot().len(), 1);

        map.set_all(HashMap::new());
        assert!(map.is_empty());
        map.reset();
        assert_eq!(map.snapshot(), initial);
    }

    #[test]
    fn test_map_missing_remove_does_not_rerender() {
        let c = Component::new();
        let map = c.render(|| use_map(HashMap::<u8, u8>::new()));
        map.remove(&1);
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_set_operations() {
        let c = Component::new();
        let set = c.render(|| use_set(HashSet::from([1, 2])));

        assert!(set.add(3));
        assert!(c.is_dirty());
        c.render(|| {
            use_set(HashSet::<i32>::new());
        });

        assert!(!set.add(3));
        assert!(!set.remove(&9));
        assert!(!c.is_dirty());

        assert!(!set.toggle(1));
        assert!(set.toggle(1));
        assert!(set.has(&1));
        assert_eq!(set.len(), 3);

        set.clear();
        assert!(set.is_empty());
        set.reset();
        assert_eq!(set.snapshot(), HashSet::from([1, 2]));
    }

    #[test]
    fn test_storage_seeds_missing_key() {
        let backend = Rc::new(MemoryStorage::new());
        let c = Component::new();
        let stored = c.render(|| use_storage(backend.clone(), "count", 3u32));
        assert_eq!(stored.value(), Some(3));
        assert_eq!(backend.raw("count").as_deref(), Some("3"));
        assert_eq!(stored.key(), "count");
    }

    #[test]
    fn test_storage_reads_existing_and_writes_through() {
        let backend = Rc::new(MemoryStorage::new());
        backend.set_item("prefs", r#"{"dark":true}"#).unwrap();

        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Prefs {
            dark: bool,
        }

        let c = Component::new();
        let prefs = c.render(|| use_storage(backend.clone(), "prefs", Prefs { dark: false }));
        assert_eq!(prefs.value(), Some(Prefs { dark: true }));

        prefs.set(Prefs { dark: false }).unwrap();
        assert_eq!(backend.raw("prefs").as_deref(), Some(r#"{"dark":false}"#));
        assert!(c.is_dirty());

        let again = c.render(|| use_storage(backend.clone(), "prefs", Prefs { dark: true }));
        assert_eq!(again.with(|p| p.map(|p| p.dark)), Some(false));
    }

    #[test]
    fn test_storage_bad_json_falls_back() {
        let backend = Rc::new(MemoryStorage::new());
        backend.set_item("n", "not json").unwrap();
        let c = Component::new();
        let n = c.render(|| use_storage(backend.clone(), "n", 7i32));
        assert_eq!(n.value(), Some(7));
        // left alone until the next write
        assert_eq!(backend.raw("n").as_deref(), Some("not json"));
    }

    #[test]
    fn test_storage_remove() {
        let backend = Rc::new(MemoryStorage::new());
        let c = Component::new();
        let s = c.render(|| use_storage(backend.clone(), "k", "v".to_string()));
        s.remove().unwrap();
        assert_eq!(s.value(), None);
        assert!(backend.is_empty());

        // not re-seeded on later passes
        let s = c.render(|| use_storage(backend.clone(), "k", "v".to_string()));
        assert_eq!(s.value(), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_storage_key_change_reloads() {
        let backend = Rc::new(MemoryStorage::new());
        backend.set_item("b", "2").unwrap();
        let c = Component::new();
        let s = c.render(|| use_storage(backend.clone(), "a", 1));
        assert_eq!(s.value(), Some(1));
        let s = c.render(|| use_storage(backend.clone(), "b", 1));
        assert_eq!(s.value(), Some(2));
        assert_eq!(s.key(), "b");
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_storage_key_change_settles_in_one_pass() {
        let backend = Rc::new(MemoryStorage::new());
        backend.set_item("b", "5").unwrap();
        let key = Rc::new(RefCell::new("a"));

        let mut scheduler = Scheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (backend2, key2, seen2) = (backend.clone(), key.clone(), seen.clone());
        let id = scheduler.mount(move || {
            let s = use_storage(backend2.clone(), *key2.borrow(), 1);
            seen2.borrow_mut().push(s.value());
        });
        assert_eq!(*seen.borrow(), vec![Some(1)]);

        *key.borrow_mut() = "b";
        assert!(scheduler.component(id).expect("mounted").invalidate());
        assert_eq!(scheduler.flush(), 1);
        assert_eq!(*seen.borrow(), vec![Some(1), Some(5)]);
    }

    #[test]
    fn test_local_and_session_are_separate() {
        let c = Component::new();
        let (local, session) = c.render(|| {
            (
                use_local_storage("tether-test-key", 1),
                use_session_storage("tether-test-key", 2),
            )
        });
        local.set(10).unwrap();
        assert_eq!(
            local_storage().get_item("tether-test-key").unwrap().as_deref(),
            Some("10")
        );
        assert_eq!(
            session_storage().get_item("tether-test-key").unwrap().as_deref(),
            Some("2")
        );
        session.remove().unwrap();
        assert_eq!(session_storage().get_item("tether-test-key").unwrap(), None);
    }

    #[test]
    fn test_storage_error_messages() {
        let err = StorageError::Backend("quota exceeded".into());
        assert_eq!(err.to_string(), "storage backend failed: quota exceeded");
        assert_eq!(
            StorageError::Unavailable.to_string(),
            "storage is not available in this environment"
        );
    }

    #[test]
    fn test_previous() {
        let c = Component::new();
        assert_eq!(c.render(|| use_previous(1)), None);
        assert_eq!(c.render(|| use_previous(2)), Some(1));
        assert_eq!(c.render(|| use_previous(2)), Some(2));
        assert_eq!(c.render(|| use_previous(5)), Some(2));
    }

    #[test]
    fn test_previous_distinct() {
        let c = Component::new();
        let eq = |a: &i32, b: &i32| a == b;
        assert_eq!(c.render(|| use_previous_distinct(1, eq)), None);
        assert_eq!(c.render(|| use_previous_distinct(1, eq)), None);
        assert_eq!(c.render(|| use_previous_distinct(2, eq)), Some(1));
        assert_eq!(c.render(|| use_previous_distinct(2, eq)), Some(1));
        assert_eq!(c.render(|| use_previous_distinct(3, eq)), Some(2));
    }

    #[test]
    fn test_latest() {
        let c = Component::new();
        let cell = c.render(|| use_latest("first"));
        assert_eq!(*cell.borrow(), "first");
        c.render(|| {
            use_latest("second");
        });
        assert_eq!(*cell.borrow(), "second");
    }

    #[test]
    fn test_render_count() {
        let c = Component::new();
        assert_eq!(c.render(use_render_count), 1);
        assert_eq!(c.render(use_render_count), 2);
        assert_eq!(c.render(use_render_count), 3);
    }

    #[test]
    fn test_first_mount_state() {
        let c = Component::new();
        assert!(c.render(use_first_mount_state));
        assert!(!c.render(use_first_mount_state));
        assert!(!c.render(use_first_mount_state));
    }

    #[test]
    fn test_mount_and_unmount() {
        let log = new_log();
        let c = Component::new();
        for pass in 0..3 {
            c.render(|| {
                let l = log.clone();
                use_mount(move || push(&l, "mount"));
                let l = log.clone();
                use_unmount(move || push(&l, format!("unmount from pass {pass}")));
            });
        }
        assert_eq!(*log.borrow(), vec!["mount"]);
        c.unmount();
        assert_eq!(*log.borrow(), vec!["mount", "unmount from pass 2"]);
    }

    #[test]
    fn test_effect_once_cleans_up_on_unmount() {
        let log = new_log();
        let c = Component::new();
        for _ in 0..2 {
            c.render(|| {
                let l = log.clone();
                use_effect_once(move || {
                    push(&l, "once");
                    on_unmount(move || push(&l, "cleanup"))
                });
            });
        }
        c.unmount();
        assert_eq!(*log.borrow(), vec!["once", "cleanup"]);
    }

    #[test]
    fn test_update_effect_skips_first_pass() {
        let log = new_log();
        let c = Component::new();
        for key in [1, 1, 2, 2, 3] {
            c.render(|| {
                let l = log.clone();
                use_update_effect(key, move || {
                    push(&l, format!("update {key}"));
                    Dispose::none()
                });
            });
        }
        assert_eq!(*log.borrow(), vec!["update 2", "update 3"]);
    }

    #[test]
    fn test_is_mounted() {
        let c = Component::new();
        let during = Rc::new(RefCell::new(None));
        let mounted = {
            let during = during.clone();
            c.render(move || {
                let m = use_is_mounted();
                *during.borrow_mut() = Some(m.get());
                m
            })
        };
        assert_eq!(*during.borrow(), Some(false));
        assert!(mounted.get());
        c.unmount();
        assert!(!mounted.get());
    }

    #[test]
    fn test_rerender() {
        let c = Component::new();
        let r = c.render(use_rerender);
        assert!(r.request());
        assert!(c.is_dirty());
        assert!(!r.request());

        c.unmount();
        assert!(!r.request());
    }

    fn deep_body(log: &Log, deps: Option<Value>) {
        let log = log.clone();
        use_deep_compare_effect(deps, move || {
            push(&log, "run");
            let log = log.clone();
            on_unmount(move || push(&log, "clean"))
        });
    }

    #[test]
    fn test_deep_compare_effect_gates_on_structure() {
        let log = new_log();
        let c = Component::new();
        let filters = |page: i64| Value::record([("page", Value::Int(page)), ("tags", deps!["a"])]);

        c.render(|| deep_body(&log, Some(deps![filters(1)])));
        c.render(|| deep_body(&log, Some(deps![filters(1)])));
        assert_eq!(*log.borrow(), vec!["run"]);

        c.render(|| deep_body(&log, Some(deps![filters(2)])));
        assert_eq!(*log.borrow(), vec!["run", "clean", "run"]);

        c.unmount();
        assert_eq!(*log.borrow(), vec!["run", "clean", "run", "clean"]);
    }

    #[test]
    fn test_deep_compare_effect_without_deps_runs_every_pass() {
        let log = new_log();
        let c = Component::new();
        for _ in 0..3 {
            c.render(|| deep_body(&log, None));
        }
        assert_eq!(log.borrow().iter().filter(|s| *s == "run").count(), 3);
    }

    #[test]
    fn test_deep_compare_effect_with_depth_bound() {
        let log = new_log();
        let c = Component::new();
        let cmp = tether_core::Comparator::with_max_depth(1);
        for _ in 0..2 {
            c.render(|| {
                let l = log.clone();
                use_deep_compare_effect_with(&cmp, Some(deps![deps![1]]), move || {
                    push(&l, "run");
                    Dispose::none()
                });
            });
        }
        // too deep to prove equal, so it re-runs
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_custom_compare_effect() {
        let log = new_log();
        let c = Component::new();
        for word in ["Hello", "HELLO", "world"] {
            c.render(|| {
                let l = log.clone();
                use_custom_compare_effect(
                    Some(word.to_string()),
                    |a, b| a.eq_ignore_ascii_case(b),
                    move || {
                        push(&l, word);
                        Dispose::none()
                    },
                );
            });
        }
        assert_eq!(*log.borrow(), vec!["Hello", "world"]);
    }

    #[test]
    fn test_hooks_drive_scheduler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut sched = Scheduler::new();
        {
            let seen = seen.clone();
            sched.mount(move || {
                let items = use_list(Vec::<u32>::new());
                let prev_len = use_previous(items.len());
                seen.borrow_mut().push((items.len(), prev_len));
                if items.len() < 2 {
                    let items = items.clone();
                    tether_core::on_commit(move || items.push(1));
                }
            });
        }
        assert_eq!(sched.flush(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![(0, None), (1, Some(0)), (2, Some(1))]
        );
    }
}
