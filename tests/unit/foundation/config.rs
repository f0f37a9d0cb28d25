use super::*;

#[test]
fn default_is_parallel_on_global_pool() {
    let t = RowThreading::default();
    assert!(t.parallel);
    assert_eq!(t.threads, None);
    assert!(t.build_pool().unwrap().is_none());
}

#[test]
fn zero_threads_is_rejected() {
    let err = RowThreading::with_threads(0).build_pool().unwrap_err();
    assert!(matches!(err, LumenError::Config(_)));
}

#[test]
fn sized_pool_has_requested_workers() {
    let pool = RowThreading::with_threads(2).build_pool().unwrap().unwrap();
    assert_eq!(pool.install(rayon::current_num_threads), 2);
}

#[test]
fn sequential_never_builds_a_pool() {
    let t = RowThreading {
        parallel: false,
        threads: Some(4),
    };
    assert!(t.build_pool().unwrap().is_none());
}

#[test]
fn deserializes_with_defaults() {
    let t: RowThreading = serde_json::from_str(r#"{ "threads": 3 }"#).unwrap();
    assert_eq!(t, RowThreading::with_threads(3));
    let t: RowThreading = serde_json::from_str(r#"{ "parallel": false }"#).unwrap();
    assert_eq!(t, RowThreading::sequential());
}
