mod batch;
mod callback;
mod handle;
mod scheduler;
mod source;

pub use batch::BatchJob;
pub use callback::{CallbackResult, FrameCallback, IntoCallbackResult};
pub use handle::RemoveHandle;
pub use scheduler::{FrameScheduler, RunState};
pub use source::{FrameRequestId, FrameSource, FrameTask, IntervalFrames, ManualFrames};
