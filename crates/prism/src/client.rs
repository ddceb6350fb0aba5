use std::sync::Arc;
use std::time::Duration;

use crate::models::completion::{CompletionResult, ProviderResponse};
use crate::models::message::Message;
use crate::providers::base::Provider;

pub const MAX_ATTEMPTS: u32 = 3;
pub const INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Substrings that mark a provider error as rate limiting:
/// the HTTP status and Gemini's quota status
pub const RATE_LIMIT_INDICATORS: [&str; 2] = ["429", "RESOURCE_EXHAUSTED"];

/// How many times to attempt a request and how long to wait before the first retry.
/// The wait doubles after every retry. There is always at least one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, INITIAL_DELAY)
    }
}

/// Blocks the current thread between attempts
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Receives advisory notices, like an upcoming retry, for display to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &str);
}

pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notice: &str) {}
}

/// Decides from an error's text whether the failure was caused by rate limiting
pub trait RateLimitDetector: Send + Sync {
    fn is_rate_limited(&self, error: &str) -> bool;
}

/// Matches any of a list of substrings
#[derive(Debug, Clone)]
pub struct SubstringDetector {
    indicators: Vec<String>,
}

impl SubstringDetector {
    pub fn new<I, S>(indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            indicators: indicators.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for SubstringDetector {
    fn default() -> Self {
        Self::new(RATE_LIMIT_INDICATORS)
    }
}

impl RateLimitDetector for SubstringDetector {
    fn is_rate_limited(&self, error: &str) -> bool {
        self.indicators
            .iter()
            .any(|indicator| error.contains(indicator.as_str()))
    }
}

impl<F> RateLimitDetector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_rate_limited(&self, error: &str) -> bool {
        self(error)
    }
}

impl<S: Sleeper + ?Sized> Sleeper for Arc<S> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notice: &str) {
        (**self).notify(notice)
    }
}

/// Issues single chat completion requests, retrying with exponential backoff while the
/// provider reports rate limiting.
///
/// `request` never fails: every outcome, including transport errors and exhausted
/// retries, comes back as a [`CompletionResult`].
pub struct CompletionClient<P> {
    provider: P,
    policy: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
    notifier: Box<dyn Notifier>,
    detector: Box<dyn RateLimitDetector>,
}

impl<P: Provider> CompletionClient<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            policy: RetryPolicy::default(),
            sleeper: Box::new(ThreadSleeper),
            notifier: Box::new(SilentNotifier),
            detector: Box::new(SubstringDetector::default()),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_rate_limit_detector(mut self, detector: impl RateLimitDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn request(
        &self,
        model_id: &str,
        api_key: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> CompletionResult {
        let messages = Message::exchange(system_prompt, user_prompt);
        let max_attempts = self.policy.max_attempts;
        let mut delay = self.policy.initial_delay;
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            tracing::debug!(model = model_id, attempt, "requesting completion");

            let error = match self.provider.call(model_id, &messages, api_key) {
                Ok(response) => {
                    let text = ProviderResponse::from_value(response).into_text();
                    return CompletionResult::Text(text);
                }
                Err(e) => format!("{:#}", e),
            };

            if !self.detector.is_rate_limited(&error) {
                tracing::debug!(model = model_id, attempt, error = %error, "completion failed");
                return CompletionResult::Error(error);
            }

            last_error = error;
            if attempt == max_attempts {
                break;
            }

            let notice = format!(
                "rate limit for {}, retrying in {}s",
                model_id,
                delay.as_secs_f64()
            );
            tracing::warn!(
                model = model_id,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "{}",
                notice
            );
            self.notifier.notify(&notice);
            self.sleeper.sleep(delay);
            delay *= 2;
        }

        tracing::warn!(model = model_id, max_attempts, "rate limit retries exhausted");
        CompletionResult::Error(format!(
            "Failed after {} attempts due to rate limiting: {}",
            max_attempts, last_error
        ))
    }
}
