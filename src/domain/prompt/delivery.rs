//! Delivery playbook builder.
//!
//! No archetype dispatch: the playbook is the operational backbone shared by
//! every delivery organization, parameterized by stack and constraints only.

use crate::domain::project::{Project, UserProfile};

use super::context::{or_unspecified, render_context};
use super::rules::{ANTI_FABRICATION_RULES, FORMAT_CONTRACT};

pub(super) fn build(project: &Project, user: &UserProfile) -> String {
    format!(
        "You are an expert in operational excellence, delivery management and software engineering.\n\
         Your mission: write a DELIVERY PLAYBOOK ready to be applied by a team (V1 \"Ready to Scale\").\n\
         \n\
         {context}\n\
         - Stack / tech: {stack}\n\
         - Team capacity: {capacity}\n\
         \n\
         {rules}\n\
         - Everything must be actionable: checklists, templates, criteria, rituals, gates.\n\
         - Tone: pragmatic, iterative, quality-first.\n\
         \n\
         {format}\n\
         \n\
         REQUIRED STRUCTURE:\n\
         ## 0. Purpose & operating principles\n\
         - 7 principles max (e.g. \"No undocumented change\", \"Quality gates are non-negotiable\")\n\
         \n\
         ## 1. Governance & roles (RACI)\n\
         - Roles: product owner, tech lead, QA, dev, ops, client sponsor, key users\n\
         - Who decides what, who validates what, expected decision response times\n\
         \n\
         ## 2. Client onboarding phase (0 -> 24h)\n\
         - \"Kickoff Ready\" checklist\n\
         - Intake: access, environments, constraints, data, stakeholders\n\
         - Starter pack: kickoff agenda, channels, reference document, calendar\n\
         - Template: kickoff minutes (sections)\n\
         \n\
         ## 3. Scoping & execution contract (scope control)\n\
         - Scope definition (in/out) + assumptions\n\
         - Acceptance criteria per deliverable\n\
         - Change Request process: flow, estimates, validation, impact\n\
         - Scope gate: no build without ready criteria\n\
         \n\
         ## 4. Production workflow (alpha -> beta -> release)\n\
         - Definition of Ready and Definition of Done\n\
         - Branching strategy (trunk-based or gitflow, per context)\n\
         - Minimal CI/CD (lint, tests, build, security scan)\n\
         - Versioning convention (SemVer)\n\
         - Mandatory artifacts: decision records, README, runbook, changelog\n\
         \n\
         ## 5. Quality control system\n\
         - Code quality: lint, formatting, complexity, duplication\n\
         - Tests: unit, integration, e2e, smoke\n\
         - Security: secrets, dependencies, access control, audit logs\n\
         - Performance: perf budget, profiling, pagination, caching\n\
         - UX: basic accessibility, responsive behavior, error states\n\
         \n\
         ## 6. Architecture patterns & standards\n\
         For each pattern give: when to use / when to avoid / one concrete example in this project.\n\
         - Design patterns: factory, strategy, adapter, facade, repository\n\
         - System patterns: layered architecture, modular monolith (default) vs. microservices (conditions)\n\
         - Resilience patterns: retry with backoff, circuit breaker, timeout, idempotency keys, rate limiting\n\
         \n\
         ## 7. Feedback & continuous improvement\n\
         - Cadence (weekly, sprint review, demo)\n\
         - Feedback collection: forms, interviews, analytics\n\
         - Prioritization: ICE/RICE\n\
         - Rituals: retrospective, blameless post-mortem\n\
         \n\
         ## 8. Communication & reporting (client + internal)\n\
         - Weekly report template (progress, risks, awaited decisions)\n\
         - Risk matrix (probability/impact/plan)\n\
         - Incident handling (when things break, who alerts)\n\
         \n\
         ## 9. Deployment, run & support\n\
         - Environments (dev/staging/prod)\n\
         - Observability: logs, metrics, traces (minimum)\n\
         - Operations runbook\n\
         - Support SLA (if offered) + escalation process\n\
         \n\
         ## 10. Appendices (templates)\n\
         Provide at least 6 templates:\n\
         - 1) Kickoff note\n\
         - 2) Weekly report\n\
         - 3) Change request\n\
         - 4) Release checklist\n\
         - 5) Decision record\n\
         - 6) Minimal runbook\n\
         \n\
         EXPECTED OUTPUT:\n\
         - A complete document, directly usable in a team wiki.\n\
         - No vague paragraphs: every section contains lists, checklists and examples.",
        context = render_context(project, user),
        stack = or_unspecified(project.stack.as_deref()),
        capacity = or_unspecified(user.team_capacity.as_deref()),
        rules = ANTI_FABRICATION_RULES,
        format = FORMAT_CONTRACT,
    )
}
