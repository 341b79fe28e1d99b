//! Declarative insight rules.
//!
//! Every rule is evaluated independently and in table order; a rule whose
//! predicate holds contributes exactly one insight. Rules sharing a category
//! may all fire.

use tracing::debug;

use crate::analysis::normalizer::NormalizedFacts;
use crate::config::InsightThresholds;
use crate::models::{
    Impact, Insight, InsightKind, Insights, ScoreBreakdown, Severity, Significance,
};

/// Inputs visible to rule predicates and evidence builders.
pub struct RuleContext<'a> {
    pub facts: &'a NormalizedFacts,
    pub breakdown: &'a ScoreBreakdown,
    pub t: &'a InsightThresholds,
}

impl RuleContext<'_> {
    fn repo_count(&self) -> usize {
        self.facts.repos.total_repos
    }

    fn has_repos(&self) -> bool {
        self.repo_count() > 0
    }

    /// Completeness percentage as reported in the professionalism breakdown.
    fn completeness_pct(&self) -> f64 {
        self.breakdown
            .professionalism
            .details
            .nested("profile_completeness")
            .and_then(|d| d.scalar("percentage"))
            .unwrap_or(0.0)
    }

    fn missing_profile_fields(&self) -> Vec<&'static str> {
        let p = &self.facts.profile.facts;
        [
            (p.has_name, "name"),
            (p.has_bio(), "bio"),
            (p.has_location, "location"),
            (p.has_email, "email"),
            (p.has_company, "company"),
            (p.has_website(), "website"),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, name)| name)
        .collect()
    }
}

pub struct InsightRule {
    pub kind: InsightKind,
    /// Broad area such as "Activity"; several rules share one.
    pub category: &'static str,
    /// Unique name of the insight, e.g. "Superficial Activity".
    pub title: &'static str,
    pub significance: Significance,
    pub applies: fn(&RuleContext) -> bool,
    pub describe: fn(&RuleContext) -> String,
    pub evidence: fn(&RuleContext) -> Vec<String>,
    pub guidance: Option<&'static str>,
}

impl InsightRule {
    pub fn evaluate(&self, ctx: &RuleContext) -> Option<Insight> {
        if !(self.applies)(ctx) {
            return None;
        }
        Some(Insight {
            kind: self.kind,
            category: self.category.to_string(),
            title: self.title.to_string(),
            description: (self.describe)(ctx),
            evidence: (self.evidence)(ctx),
            significance: self.significance,
            guidance: self.guidance.map(str::to_string),
        })
    }
}

const HIGH: Significance = Significance::Impact(Impact::High);
const MEDIUM: Significance = Significance::Impact(Impact::Medium);
const CRITICAL: Significance = Significance::Severity(Severity::Critical);
const MODERATE: Significance = Significance::Severity(Severity::Moderate);
const MINOR: Significance = Significance::Severity(Severity::Minor);

pub static RULES: &[InsightRule] = &[
    // Strengths: activity
    InsightRule {
        kind: InsightKind::Strength,
        category: "Activity",
        title: "Consistent Code Contributor",
        significance: HIGH,
        applies: |c| c.facts.activity.commits_per_month >= c.t.strong_commit_frequency,
        describe: |c| {
            format!(
                "Maintains an impressive commit frequency of {:.1} commits per month",
                c.facts.activity.commits_per_month
            )
        },
        evidence: |c| {
            let a = &c.facts.activity;
            vec![
                format!("commit frequency: {:.0}/month", a.commits_per_month),
                format!("{} total commits", a.total_commits),
                format!("{:.0} commits in the last year", a.commits_last_year),
                format!("{} active days", a.active_days),
            ]
        },
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Activity",
        title: "Dedicated Developer",
        significance: HIGH,
        applies: |c| c.facts.activity.longest_streak >= c.t.dedicated_streak_days,
        describe: |c| {
            format!(
                "Achieved a {}-day coding streak, demonstrating commitment and discipline",
                c.facts.activity.longest_streak
            )
        },
        evidence: |c| {
            vec![
                format!("Longest streak: {} days", c.facts.activity.longest_streak),
                format!("Current streak: {} days", c.facts.activity.current_streak),
            ]
        },
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Activity",
        title: "Currently Active Developer",
        significance: HIGH,
        applies: |c| c.facts.activity.commits_last_year >= c.t.active_recent_commits,
        describe: |_| {
            "Shows strong recent activity with consistent contributions in the past year"
                .to_string()
        },
        evidence: |c| {
            vec![format!(
                "{:.0} commits in the last 365 days",
                c.facts.activity.commits_last_year
            )]
        },
        guidance: None,
    },
    // Strengths: documentation
    InsightRule {
        kind: InsightKind::Strength,
        category: "Documentation",
        title: "Strong Documentation Culture",
        significance: HIGH,
        applies: |c| c.has_repos() && c.facts.repos.readme_ratio >= c.t.documentation_culture_ratio,
        describe: |c| {
            format!(
                "Maintains READMEs in {:.0}% of repositories",
                c.facts.repos.readme_ratio * 100.0
            )
        },
        evidence: |c| {
            vec![format!(
                "{} of {} repositories have a README",
                c.facts.repos.repos_with_readme,
                c.repo_count()
            )]
        },
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Documentation",
        title: "Clear Communicator",
        significance: MEDIUM,
        applies: |c| c.has_repos() && c.facts.repos.description_ratio >= c.t.clear_description_ratio,
        describe: |_| {
            "Provides clear descriptions for projects, showing good communication skills"
                .to_string()
        },
        evidence: |c| {
            vec![format!(
                "{} out of {} repos have descriptions",
                c.facts.repos.repos_with_description,
                c.repo_count()
            )]
        },
        guidance: None,
    },
    // Strengths: quality
    InsightRule {
        kind: InsightKind::Strength,
        category: "Quality",
        title: "Community-Validated Projects",
        significance: HIGH,
        applies: |c| c.facts.repos.total_stars >= c.t.validated_stars,
        describe: |c| {
            format!(
                "Projects have earned {} stars from the community",
                c.facts.repos.total_stars
            )
        },
        evidence: |c| {
            vec![
                format!("{} total stars", c.facts.repos.total_stars),
                format!("{} total forks", c.facts.repos.total_forks),
            ]
        },
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Quality",
        title: "Polyglot Developer",
        significance: HIGH,
        applies: |c| c.facts.repos.unique_language_count >= c.t.polyglot_languages,
        describe: |c| {
            format!(
                "Works across {} programming languages",
                c.facts.repos.unique_language_count
            )
        },
        evidence: |c| {
            vec![
                format!(
                    "Primary language: {}",
                    c.facts.repos.primary_language.as_deref().unwrap_or("Not specified")
                ),
                format!("Total languages: {}", c.facts.repos.unique_language_count),
            ]
        },
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Quality",
        title: "Active Project Maintenance",
        significance: MEDIUM,
        applies: |c| c.has_repos() && c.facts.repos.freshness_ratio >= c.t.maintained_ratio,
        describe: |_| "Regularly updates and maintains projects".to_string(),
        evidence: |c| {
            vec![format!(
                "{} repos updated in the last 6 months",
                c.facts.repos.recently_updated
            )]
        },
        guidance: None,
    },
    // Strengths: professionalism
    InsightRule {
        kind: InsightKind::Strength,
        category: "Professionalism",
        title: "Polished Professional Profile",
        significance: MEDIUM,
        applies: |c| c.completeness_pct() >= c.t.polished_completeness * 100.0,
        describe: |c| {
            format!(
                "Profile is {:.0}% complete with comprehensive information",
                c.completeness_pct()
            )
        },
        evidence: |c| {
            vec![format!(
                "{} of {} profile fields filled",
                c.facts.profile.filled_fields, c.facts.profile.total_fields
            )]
        },
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Professionalism",
        title: "Actively Seeking Opportunities",
        significance: MEDIUM,
        applies: |c| c.facts.profile.facts.hireable,
        describe: |_| {
            "Marked as available for hire, showing a proactive job search approach".to_string()
        },
        evidence: |_| vec!["Hireable flag enabled".to_string()],
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Professionalism",
        title: "Online Presence Beyond GitHub",
        significance: MEDIUM,
        applies: |c| c.facts.profile.facts.has_website(),
        describe: |_| "Maintains a personal website or blog".to_string(),
        evidence: |c| {
            vec![format!(
                "Website: {}",
                c.facts.profile.facts.website.as_deref().unwrap_or_default()
            )]
        },
        guidance: None,
    },
    // Strengths: impact
    InsightRule {
        kind: InsightKind::Strength,
        category: "Impact",
        title: "Recognized in Developer Community",
        significance: HIGH,
        applies: |c| c.facts.profile.facts.followers >= c.t.recognized_followers,
        describe: |c| {
            format!(
                "Has {} followers, indicating community recognition",
                c.facts.profile.facts.followers
            )
        },
        evidence: |c| vec![format!("{} followers", c.facts.profile.facts.followers)],
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Impact",
        title: "Influential Developer",
        significance: MEDIUM,
        applies: |c| {
            let p = &c.facts.profile.facts;
            p.followers > 0
                && p.following > 0
                && p.followers as f64 / p.following as f64 >= c.t.influence_ratio
        },
        describe: |_| "Strong follower-to-following ratio indicates influence".to_string(),
        evidence: |c| {
            let p = &c.facts.profile.facts;
            vec![
                format!("{} followers vs {} following", p.followers, p.following),
                format!("Ratio: {:.1}:1", c.facts.profile.follower_ratio),
            ]
        },
        guidance: None,
    },
    InsightRule {
        kind: InsightKind::Strength,
        category: "Impact",
        title: "Collaborative Codebase",
        significance: HIGH,
        applies: |c| c.facts.repos.total_forks >= c.t.collaborative_forks,
        describe: |c| {
            format!(
                "Projects have been forked {} times by other developers",
                c.facts.repos.total_forks
            )
        },
        evidence: |c| vec![format!("{} total forks", c.facts.repos.total_forks)],
        guidance: None,
    },
    // Weaknesses: activity
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Activity",
        title: "Limited Recent Activity",
        significance: MODERATE,
        applies: |c| c.facts.activity.commits_last_year < c.t.limited_recent_commits,
        describe: |c| {
            format!(
                "Only {:.0} commits in the last year",
                c.facts.activity.commits_last_year
            )
        },
        evidence: |c| {
            vec![format!(
                "commits in the last year: {:.0}",
                c.facts.activity.commits_last_year
            )]
        },
        guidance: Some(
            "Aim for consistent contributions with at least 3-5 commits per week to show active development",
        ),
    },
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Activity",
        title: "Broken Contribution Streak",
        significance: MINOR,
        applies: |c| c.facts.activity.current_streak == 0,
        describe: |_| "No contributions on the most recent recorded days".to_string(),
        evidence: |c| {
            vec![format!(
                "Longest streak: {} days",
                c.facts.activity.longest_streak
            )]
        },
        guidance: Some(
            "Build a habit of daily or weekly contributions to maintain momentum and visibility",
        ),
    },
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Activity",
        title: "Inconsistent Contribution Pattern",
        significance: MODERATE,
        applies: |c| c.facts.activity.commits_per_month < c.t.low_commit_frequency,
        describe: |c| {
            format!(
                "Low commit frequency of {:.1} commits/month",
                c.facts.activity.commits_per_month
            )
        },
        evidence: |c| {
            vec![format!(
                "commit frequency: {:.1}/month",
                c.facts.activity.commits_per_month
            )]
        },
        guidance: Some(
            "Establish a regular coding schedule and commit more frequently, even for small changes",
        ),
    },
    // Weaknesses: documentation
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Documentation",
        title: "Poor README Coverage",
        significance: MODERATE,
        applies: |c| c.has_repos() && c.facts.repos.readme_ratio < c.t.poor_readme_ratio,
        describe: |c| {
            format!(
                "Only {:.0}% of repositories have README files",
                c.facts.repos.readme_ratio * 100.0
            )
        },
        evidence: |c| {
            vec![format!(
                "{}/{} repositories have a README",
                c.facts.repos.repos_with_readme,
                c.repo_count()
            )]
        },
        guidance: Some(
            "Add comprehensive READMEs with project description, setup instructions, and usage examples",
        ),
    },
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Documentation",
        title: "Missing Project Descriptions",
        significance: MINOR,
        applies: |c| c.has_repos() && c.facts.repos.description_ratio < c.t.missing_description_ratio,
        describe: |c| {
            format!(
                "Only {}/{} repositories have descriptions",
                c.facts.repos.repos_with_description,
                c.repo_count()
            )
        },
        evidence: |c| {
            vec![format!(
                "description coverage: {:.0}%",
                c.facts.repos.description_ratio * 100.0
            )]
        },
        guidance: Some(
            "Add clear, concise descriptions to all repositories explaining what they do and why they matter",
        ),
    },
    // Weaknesses: quality
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Quality",
        title: "Low Project Visibility",
        significance: MINOR,
        applies: |c| {
            c.facts.repos.total_stars < c.t.low_visibility_stars
                && c.repo_count() > c.t.visibility_min_repos
        },
        describe: |c| {
            format!(
                "Projects have earned only {} stars",
                c.facts.repos.total_stars
            )
        },
        evidence: |c| {
            vec![format!(
                "{} stars across {} repositories",
                c.facts.repos.total_stars,
                c.repo_count()
            )]
        },
        guidance: Some(
            "Share projects on social media, forums, or blogs to increase visibility and gather feedback",
        ),
    },
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Quality",
        title: "Limited Technology Stack",
        significance: MODERATE,
        applies: |c| c.facts.repos.unique_language_count < c.t.limited_languages,
        describe: |c| {
            format!(
                "Only {} programming languages used",
                c.facts.repos.unique_language_count
            )
        },
        evidence: |c| {
            vec![format!(
                "unique languages: {}",
                c.facts.repos.unique_language_count
            )]
        },
        guidance: Some(
            "Build projects in diverse technologies to show versatility (aim for 4-5 languages)",
        ),
    },
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Quality",
        title: "Stale Project Portfolio",
        significance: MODERATE,
        applies: |c| c.has_repos() && c.facts.repos.freshness_ratio < c.t.stale_ratio,
        describe: |_| "Most repositories haven't been updated recently".to_string(),
        evidence: |c| {
            vec![format!(
                "{}/{} repositories updated in the last 6 months",
                c.facts.repos.recently_updated,
                c.repo_count()
            )]
        },
        guidance: Some(
            "Regularly maintain existing projects, add features, fix bugs, or archive outdated ones",
        ),
    },
    // Weaknesses: professionalism
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Professionalism",
        title: "Incomplete Profile",
        significance: MODERATE,
        applies: |c| c.completeness_pct() < c.t.incomplete_profile * 100.0,
        describe: |c| format!("Profile is only {:.0}% complete", c.completeness_pct()),
        evidence: |c| vec![format!("missing: {}", c.missing_profile_fields().join(", "))],
        guidance: Some("Fill in the missing fields to present a complete professional image"),
    },
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Professionalism",
        title: "Missing or Weak Bio",
        significance: MINOR,
        applies: |c| c.facts.profile.facts.bio_length() < c.t.weak_bio_length,
        describe: |_| "Bio is missing or too brief".to_string(),
        evidence: |c| {
            vec![format!(
                "bio length: {} characters",
                c.facts.profile.facts.bio_length()
            )]
        },
        guidance: Some(
            "Write a 2-3 sentence bio highlighting your skills, interests, and current work",
        ),
    },
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Professionalism",
        title: "Not Marked as Hireable",
        significance: MINOR,
        applies: |c| !c.facts.profile.facts.hireable,
        describe: |_| "Profile not flagged as open to opportunities".to_string(),
        evidence: |_| vec!["Hireable flag disabled".to_string()],
        guidance: Some("Enable the 'Available for hire' setting if you're seeking opportunities"),
    },
    // Weaknesses: impact
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Impact",
        title: "Limited Network",
        significance: MINOR,
        applies: |c| c.facts.profile.facts.followers < c.t.limited_network_followers,
        describe: |c| format!("Only {} followers", c.facts.profile.facts.followers),
        evidence: |c| vec![format!("{} followers", c.facts.profile.facts.followers)],
        guidance: Some(
            "Engage with the developer community, contribute to open source, and share your work",
        ),
    },
    InsightRule {
        kind: InsightKind::Weakness,
        category: "Impact",
        title: "No Project Adoption",
        significance: MINOR,
        applies: |c| c.facts.repos.total_forks == 0 && c.repo_count() > c.t.visibility_min_repos,
        describe: |_| "Projects haven't been forked by others".to_string(),
        evidence: |c| vec![format!("0 forks across {} repositories", c.repo_count())],
        guidance: Some(
            "Build useful tools or libraries that others might want to use and contribute to",
        ),
    },
    // Red flags: critical
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Activity",
        title: "Abandoned Account",
        significance: CRITICAL,
        applies: |c| {
            c.facts
                .repos
                .days_since_last_update
                .map(|d| d > c.t.abandoned_after_days)
                .unwrap_or(true)
        },
        describe: |_| "No repository activity in over a year".to_string(),
        evidence: |c| match c.facts.repos.days_since_last_update {
            Some(days) => vec![format!("last repository update: {} days ago", days)],
            None => vec!["no public repositories".to_string()],
        },
        guidance: Some(
            "Recruiter view: indicates a lack of current technical engagement. Fix: start contributing regularly, even with small projects or open source contributions",
        ),
    },
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Activity",
        title: "Superficial Activity",
        significance: CRITICAL,
        applies: |c| {
            (c.facts.activity.total_commits as f64) < c.t.superficial_commits
                && c.repo_count() > c.t.superficial_repos
        },
        describe: |_| "Many repositories but very few commits".to_string(),
        evidence: |c| {
            vec![
                format!("total commits: {}", c.facts.activity.total_commits),
                format!("repositories: {}", c.repo_count()),
            ]
        },
        guidance: Some(
            "Recruiter view: repositories may be forks, templates, or unfinished work. Fix: complete projects with a meaningful commit history",
        ),
    },
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Quality",
        title: "No Original Projects",
        significance: CRITICAL,
        applies: |c| c.has_repos() && c.facts.repos.coursework_ratio > c.t.coursework_ratio,
        describe: |c| {
            format!(
                "{}/{} repositories appear to be tutorials or coursework",
                c.facts.repos.coursework_repos,
                c.repo_count()
            )
        },
        evidence: |c| {
            vec![format!(
                "coursework share: {:.0}%",
                c.facts.repos.coursework_ratio * 100.0
            )]
        },
        guidance: Some(
            "Recruiter view: raises questions about building from scratch. Fix: build 2-3 original projects that solve real problems",
        ),
    },
    // Red flags: moderate
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Documentation",
        title: "Poor Documentation Practices",
        significance: MODERATE,
        applies: |c| c.has_repos() && c.facts.repos.readme_ratio < c.t.undocumented_ratio,
        describe: |c| {
            format!(
                "Only {}/{} repositories have READMEs",
                c.facts.repos.repos_with_readme,
                c.repo_count()
            )
        },
        evidence: |c| {
            vec![format!(
                "README coverage: {:.0}%",
                c.facts.repos.readme_ratio * 100.0
            )]
        },
        guidance: Some(
            "Recruiter view: suggests weak communication habits. Fix: add READMEs explaining purpose, setup, and usage",
        ),
    },
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Professionalism",
        title: "Blank Profile",
        significance: MODERATE,
        applies: |c| {
            let p = &c.facts.profile.facts;
            !p.has_name && !p.has_bio() && !p.has_location
        },
        describe: |_| "No name, bio, or location provided".to_string(),
        evidence: |c| vec![format!("missing: {}", c.missing_profile_fields().join(", "))],
        guidance: Some(
            "Recruiter view: appears unprofessional. Fix: fill out basic profile information",
        ),
    },
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Professionalism",
        title: "Minimal Public Work",
        significance: MODERATE,
        applies: |c| c.facts.profile.facts.public_repos < c.t.minimal_public_repos,
        describe: |c| {
            format!(
                "Only {} public repositories",
                c.facts.profile.facts.public_repos
            )
        },
        evidence: |c| vec![format!("public repositories: {}", c.facts.profile.facts.public_repos)],
        guidance: Some(
            "Recruiter view: hard to assess skills without visible code. Fix: make 3-5 of your best projects public",
        ),
    },
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Activity",
        title: "Suspicious Repository Pattern",
        significance: MODERATE,
        applies: |c| {
            c.facts.profile.facts.account_age_days < c.t.new_account_days
                && c.repo_count() > c.t.new_account_repos
        },
        describe: |c| {
            format!(
                "Account created {} days ago with {} repositories",
                c.facts.profile.facts.account_age_days,
                c.repo_count()
            )
        },
        evidence: |c| {
            vec![
                format!("account age: {} days", c.facts.profile.facts.account_age_days),
                format!("repositories: {}", c.repo_count()),
            ]
        },
        guidance: Some(
            "Recruiter view: may indicate bulk uploads or an inflated repository count. Fix: keep a steady, authentic contribution pattern",
        ),
    },
    // Red flags: minor
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Activity",
        title: "Recent Inactivity",
        significance: MINOR,
        applies: |c| {
            c.facts.activity.commits_last_year > 0.0
                && c.facts
                    .repos
                    .days_since_last_update
                    .map(|d| d > c.t.inactive_after_days)
                    .unwrap_or(false)
        },
        describe: |_| "No repository updates in the last 3 months".to_string(),
        evidence: |c| {
            vec![format!(
                "last repository update: {} days ago",
                c.facts.repos.days_since_last_update.unwrap_or_default()
            )]
        },
        guidance: Some(
            "Recruiter view: may signal lost interest. Fix: make at least weekly commits to keep the profile active",
        ),
    },
    InsightRule {
        kind: InsightKind::RedFlag,
        category: "Impact",
        title: "No Community Engagement",
        significance: MINOR,
        applies: |c| c.repo_count() > c.t.unstarred_repos && c.facts.repos.total_stars == 0,
        describe: |c| format!("{} repositories with zero stars", c.repo_count()),
        evidence: |c| vec![format!("repositories: {}, stars: 0", c.repo_count())],
        guidance: Some(
            "Recruiter view: projects may not be shared with the community. Fix: share projects and build tools others find useful",
        ),
    },
];

pub struct InsightDetector<'a> {
    thresholds: &'a InsightThresholds,
    rules: &'a [InsightRule],
}

impl<'a> InsightDetector<'a> {
    pub fn new(thresholds: &'a InsightThresholds) -> Self {
        Self {
            thresholds,
            rules: RULES,
        }
    }

    pub fn with_rules(thresholds: &'a InsightThresholds, rules: &'a [InsightRule]) -> Self {
        Self { thresholds, rules }
    }

    pub fn detect(&self, facts: &NormalizedFacts, breakdown: &ScoreBreakdown) -> Insights {
        let ctx = RuleContext {
            facts,
            breakdown,
            t: self.thresholds,
        };

        let mut insights = Insights::default();
        for insight in self.rules.iter().filter_map(|rule| rule.evaluate(&ctx)) {
            insights.push(insight);
        }

        debug!(
            strengths = insights.strengths.len(),
            weaknesses = insights.weaknesses.len(),
            red_flags = insights.red_flags.len(),
            "Detected insights"
        );
        insights
    }
}
