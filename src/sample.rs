// src/sample.rs
//! Fixed illustrative preview shown above the form

use crate::types::AnalysisResult;

/// How many sample suggestions the preview lists
pub const PREVIEW_SUGGESTIONS: usize = 12;

pub const SAMPLE_SCORE: f64 = 0.72;

pub const SAMPLE_RESUME: &str = "\
Jordan Reyes
Software Engineer
EDUCATION
B.Sc. Computer Science 2019 - 2023
EXPERIENCE
Backend Engineer, Northwind Analytics 2023 - present
- Built REST APIs in Python and FastAPI serving dashboards for 40k daily users.
- Moved batch jobs to Docker containers and cut nightly runtime by 35%.
PROJECTS
Document Q&A (retrieval-augmented generation)
Python, FastAPI, FAISS, Hugging Face Transformers, React
- Indexed PDF collections with FAISS and answered questions with a local model.
SKILLS
Python, JavaScript, Java, SQL, FastAPI, React, PostgreSQL, Redis, AWS, Docker, CI/CD";

pub const SAMPLE_JD: &str = "\
Required technical and professional expertise
Strong coding skills in Java/Python (including Pandas, NumPy), data structures,
algorithms, linear algebra, probability and statistics.
Cloud platforms (AWS/Azure/Google), containerization (Docker/Kubernetes/Openshift),
virtualization (VMware, Hyper-V), monitoring and logging, AI/ML fundamentals.
* Hands-on experience with PyTorch and FSDP
* Exposure to GPU optimization and training stack internals
* Exposure to tuning techniques including SFT, LoRA, RL
Preferred technical and professional experience
* Exposure to Triton and Hugging Face
* Familiarity with GPU architectures, NCCL and PyTorch Compile";

pub const SAMPLE_SUGGESTIONS: &[&str] = &[
    "Pandas",
    "NumPy",
    "Data Structures",
    "Algorithms",
    "Linear Algebra",
    "Probability",
    "Statistics",
    "Kubernetes",
    "Openshift",
    "VMware",
    "Hyper-V",
    "Monitoring and Logging",
    "PyTorch",
    "FSDP",
    "GPU optimization",
    "Training stack internals",
    "SFT",
    "LoRA",
    "RL",
    "Triton",
    "NCCL",
    "PyTorch Compile",
];

pub const SAMPLE_QUESTIONS: &[&str] = &[
    "Describe a project where you used Pandas or NumPy to analyze or transform data. What challenges did you face?",
    "How do you approach optimizing a training pipeline on GPUs? Share specific techniques or tools you have used.",
    "Walk through your experience with PyTorch FSDP or other distributed training strategies. What trade-offs did you encounter?",
    "How would you containerize and deploy a model service with Docker and Kubernetes? Outline the core steps.",
    "What is your strategy for monitoring and logging ML services in production?",
    "Compare SFT, LoRA and RL fine-tuning approaches. When is each most appropriate?",
    "How have you used CI/CD to automate model training or deployment workflows?",
];

/// The preview as a result value, trimmed to what the preview shows
pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        match_score: SAMPLE_SCORE,
        suggestions: SAMPLE_SUGGESTIONS
            .iter()
            .take(PREVIEW_SUGGESTIONS)
            .map(|s| s.to_string())
            .collect(),
        interview_questions: SAMPLE_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        model_used: None,
        checklist_file: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::score_percent;

    #[test]
    fn test_sample_preview() {
        let sample = sample_result();
        assert_eq!(score_percent(sample.match_score), 72);
        assert_eq!(sample.suggestions.len(), PREVIEW_SUGGESTIONS);
        assert_eq!(sample.suggestions[0], "Pandas");
        assert_eq!(sample.interview_questions.len(), SAMPLE_QUESTIONS.len());
    }
}
