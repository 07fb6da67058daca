use std::{
    collections::{hash_map::Entry, HashMap},
    future::Future,
    hash::Hash,
    pin::Pin,
    time::{Duration, Instant},
};

#[derive(Default, Clone, Copy)]
pub enum ModePlan {
    #[default]
    Transparent,
    TimedOut(Duration),
}

impl ModePlan {
    pub fn into_mode<In: Hash + PartialEq + Eq>(self) -> Mode<In> {
        match self {
            Self::Transparent => Mode::Transparent,
            Self::TimedOut(timeout) => Mode::TimedOut(TimedOutState {
                timeout,
                last_request: Default::default(),
            }),
        }
    }
}

#[derive(Default, Clone)]
pub enum Mode<In: Hash + PartialEq + Eq> {
    /// Calls the underlying API on every request.
    #[default]
    Transparent,
    /// Calls the underlying API only when the configured timeout has passed
    /// since the previous call with the same input, returning the cached
    /// value otherwise.
    TimedOut(TimedOutState<In>),
}

#[derive(Clone)]
pub struct TimedOutState<In> {
    timeout: Duration,
    last_request: HashMap<In, Instant>,
}

pub(super) async fn use_cache<In, Out>(
    request: In,
    cache: Entry<'_, In, Out>,
    api_result: Pin<Box<impl Future<Output = Out>>>,
    mode: &mut Mode<In>,
) -> Out
where
    Out: Clone,
    In: Hash + PartialEq + Eq + Clone,
{
    match mode {
        Mode::Transparent => api_result.await,
        Mode::TimedOut(state) => timed_out_mode(request, cache, api_result, state).await,
    }
}

async fn timed_out_mode<In, Out>(
    request: In,
    cache: Entry<'_, In, Out>,
    api_result: Pin<Box<impl Future<Output = Out>>>,
    state: &mut TimedOutState<In>,
) -> Out
where
    Out: Clone,
    In: Hash + PartialEq + Eq + Clone,
{
    if let Entry::Occupied(cached) = &cache {
        if let Some(last_request) = state.last_request.get(&request) {
            if last_request.elapsed() < state.timeout {
                return cached.get().clone();
            }
        }
    }

    let result = api_result.await;
    cache.insert_entry(result.clone());

    state.last_request.insert(request, Instant::now());

    result
}
