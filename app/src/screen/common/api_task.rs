use tokio::task::JoinHandle;

/// Owns an API handle and at most one background task using it. The API is
/// moved into the task on spawn and handed back when the task completes.
pub struct ApiTask<A, R>(Option<ApiTaskInner<A, R>>);

enum ApiTaskInner<A, R> {
    Api(A),
    Task(JoinHandle<(A, R)>),
}

impl<A, R> ApiTask<A, R> {
    pub fn new(api: A) -> Self {
        Self(Some(ApiTaskInner::Api(api)))
    }

    /// Result of the previous task, if it finished. Spawns the next task
    /// right away whenever the API handle is free.
    pub async fn try_fetch_value(
        &mut self,
        spawn_task: impl FnOnce(A) -> JoinHandle<(A, R)>,
    ) -> Option<R> {
        let inner = self.0.take().expect("Inner state should be present");

        let (inner, result) = match inner {
            ApiTaskInner::Api(api) => (ApiTaskInner::Task(spawn_task(api)), None),
            ApiTaskInner::Task(task) => {
                if task.is_finished() {
                    let (api, result) = task.await.expect("Task should not panic");
                    (ApiTaskInner::Task(spawn_task(api)), Some(result))
                } else {
                    (ApiTaskInner::Task(task), None)
                }
            }
        };

        self.0 = Some(inner);

        result
    }

    /// Waits for the running task, if any, and returns the API handle.
    pub async fn abort(self) -> A {
        match self.0.expect("Inner state should be present") {
            ApiTaskInner::Api(api) => api,
            ApiTaskInner::Task(task) => task.await.expect("Task should not panic").0,
        }
    }
}
