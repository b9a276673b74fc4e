use super::Timer;

/// Builder for configuring and starting a timer.
///
/// `TimerBuilder` allows customizing timer parameters before the driver
/// thread is spawned. Currently, it supports naming the thread and
/// pre-sizing the deadline queue.
///
/// # Examples
///
/// ```rust,ignore
/// let timer = TimerBuilder::new()
///     .thread_name("billing-timer")
///     .capacity(256)
///     .build();
/// ```
pub struct TimerBuilder {
    /// Name given to the driver thread.
    thread_name: String,

    /// Initial capacity of the deadline queue.
    capacity: usize,
}

impl TimerBuilder {
    /// Creates a new `TimerBuilder` with default configuration.
    ///
    /// By default the driver thread is named `mora-timer` and the queue
    /// starts with room for 64 deadlines.
    pub fn new() -> Self {
        Self {
            thread_name: "mora-timer".to_string(),
            capacity: 64,
        }
    }

    /// Sets the name of the driver thread.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Sets the initial capacity of the deadline queue.
    ///
    /// The queue grows past this on demand; the capacity only avoids
    /// reallocation up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the timer with the configured options.
    ///
    /// This spawns the driver thread.
    ///
    /// # Panics
    ///
    /// Panics if the operating system refuses to spawn the thread.
    pub fn build(self) -> Timer {
        Timer::spawn(self.thread_name, self.capacity)
    }
}

impl Default for TimerBuilder {
    /// Creates a default `TimerBuilder`.
    fn default() -> Self {
        Self::new()
    }
}
