//! Study-outline generation behind a pluggable asynchronous backend.
//!
//! [`OutlineGenerator`] owns validation, timeouts and logging. Backends only
//! turn a request into content. The shipped [`TemplateBackend`] renders a
//! deterministic topic-substituted guide; other backends plug in through
//! [`OutlineBackend`] without touching callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{GenerationError, ValidationError};

/// Assistant the user asked for. Backends may use it to pick a model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Copilot,
    Gemini,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Copilot => f.write_str("copilot"),
            Provider::Gemini => f.write_str("gemini"),
        }
    }
}

impl FromStr for Provider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "copilot" => Ok(Provider::Copilot),
            "gemini" => Ok(Provider::Gemini),
            other => Err(ValidationError::invalid(
                "provider",
                format!("expected copilot or gemini, got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutlineRequest {
    pub topic: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub provider: Provider,
}

impl OutlineRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            context: String::new(),
            provider: Provider::default(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyPoint {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elaboration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoSuggestion {
    pub title: String,
    pub channel: String,
    pub duration: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedOutline {
    pub topic: String,
    pub provider: Provider,
    /// Markdown outline.
    pub outline: String,
    pub summary: String,
    pub key_points: Vec<KeyPoint>,
    pub videos: Vec<VideoSuggestion>,
}

/// Content source for the generator.
pub trait OutlineBackend: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &str;

    fn generate(
        &self,
        request: &OutlineRequest,
    ) -> impl Future<Output = Result<GeneratedOutline, GenerationError>> + Send;

    /// Longer explanation of one key point.
    fn elaborate(
        &self,
        topic: &str,
        point: &KeyPoint,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

const OUTLINE_SECTIONS: [(&str, [&str; 2]); 6] = [
    (
        "Introduction and Fundamentals",
        ["Definition and Core Concepts", "Prerequisites and Background Knowledge"],
    ),
    (
        "Theoretical Framework",
        ["Primary Theories and Models", "Key Principles and Laws"],
    ),
    (
        "Practical Applications",
        ["Real-World Implementation", "Tools and Techniques"],
    ),
    (
        "Advanced Topics",
        ["Current Research and Developments", "Specialized Applications"],
    ),
    (
        "Assessment and Mastery",
        ["Learning Objectives and Outcomes", "Study Strategies and Resources"],
    ),
    (
        "Further Learning and Development",
        ["Advanced Coursework", "Independent Study"],
    ),
];

const KEY_POINTS: [(&str, &str); 6] = [
    (
        "Fundamental Principles",
        "The core definitions and relationships every later idea in {topic} builds on.",
    ),
    (
        "Theoretical Foundations",
        "The main models used to explain {topic} and where they disagree.",
    ),
    (
        "Practical Applications",
        "How {topic} is applied to real problems, with worked case studies.",
    ),
    (
        "Problem-Solving Strategies",
        "Systematic approaches for tackling {topic} exercises and exam questions.",
    ),
    (
        "Current Developments",
        "Open questions and recent research directions in {topic}.",
    ),
    (
        "Assessment Preparation",
        "What examiners look for and how to check your own mastery of {topic}.",
    ),
];

const VIDEOS: [(&str, &str, &str, &str, &str); 6] = [
    (
        "{topic}: Complete Beginner's Guide",
        "Academic Excellence",
        "45:32",
        "complete guide",
        "Comprehensive introduction covering all fundamental concepts",
    ),
    (
        "Advanced {topic} Techniques",
        "Expert Learning Hub",
        "1:23:15",
        "advanced techniques",
        "Deep dive into complex applications and problem-solving methods",
    ),
    (
        "{topic} in 10 Minutes",
        "Quick Study",
        "10:47",
        "quick overview",
        "Rapid overview of key concepts for quick review",
    ),
    (
        "Real-World Applications of {topic}",
        "Practical Science",
        "32:18",
        "real world applications",
        "How these concepts apply in professional and everyday contexts",
    ),
    (
        "{topic} Problem Solving Workshop",
        "Study Solutions",
        "56:42",
        "problem solving",
        "Step-by-step problem solving with worked examples",
    ),
    (
        "History and Evolution of {topic}",
        "Academic Insights",
        "28:55",
        "history evolution",
        "Historical development and key figures in the field",
    ),
];

/// Deterministic template content, optionally delayed.
#[derive(Debug, Clone, Default)]
pub struct TemplateBackend {
    latency: Duration,
}

impl TemplateBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn render_outline(topic: &str, context: &str) -> String {
        const NUMERALS: [&str; 6] = ["I", "II", "III", "IV", "V", "VI"];
        let mut out = format!("# {topic} - Comprehensive Study Guide\n");
        if !context.trim().is_empty() {
            out.push_str(&format!("\n> Focus: {}\n", context.trim()));
        }
        for (numeral, (section, subsections)) in NUMERALS.iter().zip(OUTLINE_SECTIONS.iter()) {
            out.push_str(&format!("\n## {numeral}. {section}\n"));
            for (letter, sub) in ["A", "B"].iter().zip(subsections.iter()) {
                out.push_str(&format!("### {letter}. {sub}\n"));
            }
        }
        out
    }

    fn render_summary(topic: &str) -> String {
        format!(
            "{topic} is covered from first principles through advanced applications. \
             Start with the fundamentals and terminology, then work through the main \
             theories, practise on real problems, and finish with current research \
             and self-assessment."
        )
    }

    fn render_videos(topic: &str) -> Vec<VideoSuggestion> {
        VIDEOS
            .iter()
            .map(|(title, channel, duration, query, description)| VideoSuggestion {
                title: title.replace("{topic}", topic),
                channel: (*channel).to_string(),
                duration: (*duration).to_string(),
                url: format!(
                    "https://youtube.com/search?q={}",
                    urlencoding::encode(&format!("{topic} {query}"))
                ),
                description: (*description).to_string(),
            })
            .collect()
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl OutlineBackend for TemplateBackend {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(
        &self,
        request: &OutlineRequest,
    ) -> Result<GeneratedOutline, GenerationError> {
        self.delay().await;
        let topic = request.topic.trim();
        Ok(GeneratedOutline {
            topic: topic.to_string(),
            provider: request.provider,
            outline: Self::render_outline(topic, &request.context),
            summary: Self::render_summary(topic),
            key_points: KEY_POINTS
                .iter()
                .map(|(title, content)| KeyPoint {
                    title: (*title).to_string(),
                    content: content.replace("{topic}", topic),
                    elaboration: None,
                })
                .collect(),
            videos: Self::render_videos(topic),
        })
    }

    async fn elaborate(&self, topic: &str, point: &KeyPoint) -> Result<String, GenerationError> {
        self.delay().await;
        Ok(indoc::formatdoc! {"
            **Why This Matters:**
            {content}

            **Study Strategy:**
            Explain {title} in your own words, then draw a concept map
            linking it to the rest of {topic}.

            **Common Pitfalls:**
            - Memorizing without understanding
            - Skipping worked examples

            **Performance Indicators:**
            - You can apply {title} to an unfamiliar {topic} problem",
            content = point.content,
            title = point.title.to_lowercase(),
            topic = topic,
        })
    }
}

/// Validates requests and runs the backend under a timeout.
#[derive(Debug, Clone)]
pub struct OutlineGenerator<B> {
    backend: B,
    timeout: Duration,
}

impl<B: OutlineBackend> OutlineGenerator<B> {
    pub fn new(backend: B, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn timeout_error(&self) -> GenerationError {
        GenerationError::Timeout {
            timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// # Errors
    /// `EmptyTopic` for a blank topic, `Timeout` when the backend is too
    /// slow, or whatever the backend reports.
    pub async fn generate(
        &self,
        request: &OutlineRequest,
    ) -> Result<GeneratedOutline, GenerationError> {
        if request.topic.trim().is_empty() {
            return Err(GenerationError::EmptyTopic);
        }
        tracing::info!(
            backend = self.backend.name(),
            provider = %request.provider,
            topic = %request.topic,
            "generating outline"
        );
        let outline = tokio::time::timeout(self.timeout, self.backend.generate(request))
            .await
            .map_err(|_| self.timeout_error())??;
        tracing::debug!(key_points = outline.key_points.len(), "outline generated");
        Ok(outline)
    }

    /// Fill in the elaboration for one key point, reusing an earlier one.
    ///
    /// # Errors
    /// `PointOutOfRange` for a bad index, otherwise as [`Self::generate`].
    pub async fn elaborate<'a>(
        &self,
        outline: &'a mut GeneratedOutline,
        index: usize,
    ) -> Result<&'a str, GenerationError> {
        let len = outline.key_points.len();
        if index >= len {
            return Err(GenerationError::PointOutOfRange { index, len });
        }
        if outline.key_points[index].elaboration.is_none() {
            let text = tokio::time::timeout(
                self.timeout,
                self.backend
                    .elaborate(&outline.topic, &outline.key_points[index]),
            )
            .await
            .map_err(|_| self.timeout_error())??;
            outline.key_points[index].elaboration = Some(text);
        }
        Ok(outline.key_points[index]
            .elaboration
            .as_deref()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> OutlineGenerator<TemplateBackend> {
        OutlineGenerator::new(TemplateBackend::new(), Duration::from_secs(5))
    }

    struct FailingBackend;

    impl OutlineBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(
            &self,
            _request: &OutlineRequest,
        ) -> Result<GeneratedOutline, GenerationError> {
            Err(GenerationError::Backend {
                backend: "failing".to_string(),
                message: "quota exceeded".to_string(),
            })
        }

        async fn elaborate(
            &self,
            _topic: &str,
            _point: &KeyPoint,
        ) -> Result<String, GenerationError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn template_is_deterministic_and_topic_specific() {
        let request = OutlineRequest::new("Photosynthesis").with_provider(Provider::Gemini);
        let first = generator().generate(&request).await.unwrap();
        let second = generator().generate(&request).await.unwrap();
        assert_eq!(first, second);

        assert!(first.outline.starts_with("# Photosynthesis - Comprehensive Study Guide"));
        assert!(first.outline.contains("## VI. Further Learning and Development"));
        assert_eq!(first.provider, Provider::Gemini);
        assert_eq!(first.key_points.len(), 6);
        assert!(first.key_points[0].content.contains("Photosynthesis"));
        assert_eq!(
            first.videos[2].url,
            "https://youtube.com/search?q=Photosynthesis%20quick%20overview"
        );
    }

    #[tokio::test]
    async fn context_appears_in_outline() {
        let request = OutlineRequest::new("Derivatives").with_context("exam on chain rule");
        let outline = generator().generate(&request).await.unwrap();
        assert!(outline.outline.contains("> Focus: exam on chain rule"));
    }

    #[tokio::test]
    async fn blank_topic_rejected() {
        let err = generator().generate(&OutlineRequest::new("   ")).await.unwrap_err();
        assert_eq!(err, GenerationError::EmptyTopic);
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let slow = OutlineGenerator::new(
            TemplateBackend::with_latency(Duration::from_millis(500)),
            Duration::from_millis(20),
        );
        let err = slow.generate(&OutlineRequest::new("Optics")).await.unwrap_err();
        assert_eq!(err, GenerationError::Timeout { timeout_ms: 20 });
    }

    #[tokio::test]
    async fn backend_errors_propagate() {
        let failing = OutlineGenerator::new(FailingBackend, Duration::from_secs(1));
        let err = failing.generate(&OutlineRequest::new("Optics")).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn elaboration_is_cached_and_bounds_checked() {
        let generator = generator();
        let mut outline = generator
            .generate(&OutlineRequest::new("Thermodynamics"))
            .await
            .unwrap();

        let text = generator.elaborate(&mut outline, 1).await.unwrap().to_string();
        assert!(text.contains("theoretical foundations"));
        assert_eq!(outline.key_points[1].elaboration.as_deref(), Some(text.as_str()));
        assert!(outline.key_points[0].elaboration.is_none());

        let err = generator.elaborate(&mut outline, 6).await.unwrap_err();
        assert_eq!(err, GenerationError::PointOutOfRange { index: 6, len: 6 });
    }
}
