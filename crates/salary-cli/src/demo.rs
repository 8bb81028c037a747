//! Example requests bundled with the CLI.

use salary_model::PredictionInput;

/// Three representative requests covering a generic, a cloud and an entry
/// level role, each with a job description.
pub fn demo_inputs() -> Vec<PredictionInput> {
    vec![
        PredictionInput::new("Cybersecurity Engineer", "Mid", 4.0, "TX")
            .with_skills(["siem", "soar", "zero_trust", "cissp"])
            .with_description(
                "We need a mid-level security engineer with SIEM/SOAR, Zero Trust, and CISSP preferred.",
            ),
        PredictionInput::new("Cloud Security Engineer", "Senior", 9.0, "CA")
            .with_skills(["aws_security", "kubernetes", "terraform", "cnapp", "ccsp"])
            .with_description(
                "Senior Cloud Security Engineer - AWS, Kubernetes, Terraform, CNAPP, CCSP.",
            ),
        PredictionInput::new("SOC Analyst", "Entry", 1.0, "REMOTE")
            .with_skills(["siem", "edr", "security_plus"])
            .with_description(
                "Entry SOC analyst with EDR and SIEM experience. Security+ is a plus.",
            ),
    ]
}
