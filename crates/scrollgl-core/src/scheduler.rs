/// Animation-frame style scheduler used by the render loop.
///
/// `schedule` requests exactly one future call of the host's tick entry
/// point; `cancel_pending` revokes the outstanding request, if any.
pub trait FrameScheduler {
    fn schedule(&mut self);
    fn cancel_pending(&mut self);
}
