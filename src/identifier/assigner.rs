//! Identifier assignment
//!
//! Builds the identifier for an offering from its own fields plus a program
//! lookup and an instructor lookup. Both lookups run concurrently, each bounded
//! by a timeout; any failure degrades to the documented fallback segment.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::CoursetrailResult;
use crate::models::Offering;

use super::code::{
    category_code, date_code, instructor_initials, language_code, location_code, program_code,
};
use super::directory::{ProgramDirectory, ProgramInfo, UserDirectory, UserInfo};

/// Default upper bound for a single directory lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Assigns write-once identifiers to offerings
pub struct IdentifierAssigner<'a> {
    programs: &'a dyn ProgramDirectory,
    users: &'a dyn UserDirectory,
    timeout: Duration,
}

impl<'a> IdentifierAssigner<'a> {
    pub fn new(programs: &'a dyn ProgramDirectory, users: &'a dyn UserDirectory) -> Self {
        Self {
            programs,
            users,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Override the per-lookup timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Assign an identifier if the offering has none yet
    ///
    /// Returns the new code, or `None` when nothing was assigned: the offering
    /// already carries a non-blank identifier, or it has no start date to
    /// build the date segment from. Never fails.
    pub async fn assign(&self, offering: &mut Offering) -> Option<String> {
        if offering.has_identifier() {
            debug!(offering = %offering.id, "identifier already assigned");
            return None;
        }

        let Some(start_date) = offering.start_date else {
            debug!(offering = %offering.id, "no start date, leaving identifier unset");
            return None;
        };

        let code = self.generate(offering, start_date).await;
        debug!(offering = %offering.id, identifier = %code, "assigned identifier");
        offering.identifier = Some(code.clone());
        Some(code)
    }

    /// Compute the identifier for `offering` without touching it
    pub async fn generate(&self, offering: &Offering, start_date: NaiveDate) -> String {
        let (program, instructor) = tokio::join!(
            self.lookup_program(offering),
            self.lookup_instructor(offering)
        );

        let program_segment = match program {
            Some(program) => program_code(&program),
            None => category_code(&offering.category),
        };

        format!(
            "{}{}{}{}{}",
            program_segment,
            language_code(offering.language),
            date_code(start_date),
            instructor_initials(instructor.as_ref()),
            location_code(offering.campus.as_deref()),
        )
    }

    async fn lookup_program(&self, offering: &Offering) -> Option<ProgramInfo> {
        let id = offering.program_id?;
        self.bounded("program", &id.to_string(), self.programs.resolve(id))
            .await
    }

    async fn lookup_instructor(&self, offering: &Offering) -> Option<UserInfo> {
        let id = offering.instructor_id?;
        self.bounded("instructor", &id.to_string(), self.users.resolve(id))
            .await
    }

    /// Run one lookup under the timeout, folding every failure into `None`
    async fn bounded<T, F>(&self, lookup: &str, reference: &str, fut: F) -> Option<T>
    where
        F: Future<Output = CoursetrailResult<Option<T>>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(Some(found))) => Some(found),
            Ok(Ok(None)) => {
                warn!(lookup, reference, "reference did not resolve, using fallback");
                None
            }
            Ok(Err(e)) => {
                warn!(lookup, reference, error = %e, "lookup failed, using fallback");
                None
            }
            Err(_) => {
                warn!(
                    lookup,
                    reference,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "lookup timed out, using fallback"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoursetrailError;
    use crate::identifier::code::is_well_formed;
    use crate::models::{Language, ProgramId, UserId};
    use async_trait::async_trait;
    use regex::Regex;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakePrograms {
        known: HashMap<ProgramId, String>,
        broken: bool,
        slow: bool,
    }

    #[async_trait]
    impl ProgramDirectory for FakePrograms {
        async fn resolve(&self, id: ProgramId) -> CoursetrailResult<Option<ProgramInfo>> {
            if self.slow {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            if self.broken {
                return Err(CoursetrailError::Lookup("directory unreachable".into()));
            }
            Ok(self.known.get(&id).map(|name| ProgramInfo { name: name.clone() }))
        }
    }

    #[derive(Default)]
    struct FakeUsers {
        known: HashMap<UserId, (String, String)>,
        broken: bool,
        slow: bool,
    }

    #[async_trait]
    impl UserDirectory for FakeUsers {
        async fn resolve(&self, id: UserId) -> CoursetrailResult<Option<UserInfo>> {
            if self.slow {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            if self.broken {
                return Err(CoursetrailError::Lookup("directory unreachable".into()));
            }
            Ok(self.known.get(&id).map(|(first, last)| UserInfo {
                first_name: first.clone(),
                last_name: last.clone(),
            }))
        }
    }

    struct Fixture {
        programs: FakePrograms,
        users: FakeUsers,
        offering: Offering,
    }

    fn scenario_a() -> Fixture {
        let program_id = ProgramId::new();
        let instructor_id = UserId::new();

        let mut programs = FakePrograms::default();
        programs
            .known
            .insert(program_id, "Professional Makeup Artistry".into());

        let mut users = FakeUsers::default();
        users
            .known
            .insert(instructor_id, ("Alina".into(), "Santiago".into()));

        let mut offering = Offering::new("Makeup Artistry Cohort", "Intro to Makeup Artistry");
        offering.language = Language::English;
        offering.start_date = NaiveDate::from_ymd_opt(2025, 1, 11);
        offering.program_id = Some(program_id);
        offering.instructor_id = Some(instructor_id);
        offering.campus = Some("Santa Ana".into());

        Fixture {
            programs,
            users,
            offering,
        }
    }

    #[tokio::test]
    async fn test_scenario_full_identifier() {
        let mut fx = scenario_a();
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        let code = assigner.assign(&mut fx.offering).await;

        assert_eq!(code.as_deref(), Some("PME0125ASSA"));
        assert_eq!(fx.offering.identifier.as_deref(), Some("PME0125ASSA"));
    }

    #[tokio::test]
    async fn test_spanish_offering() {
        let mut fx = scenario_a();
        fx.offering.language = Language::Spanish;
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        let code = assigner.assign(&mut fx.offering).await.unwrap();
        assert_eq!(code, "PMS0125ASSA");
    }

    #[tokio::test]
    async fn test_unresolved_program_falls_back_to_category() {
        let mut fx = scenario_a();
        fx.programs.known.clear();
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        let code = assigner.assign(&mut fx.offering).await.unwrap();
        assert_eq!(&code[..2], "IN");
        assert_eq!(code, "INE0125ASSA");
    }

    #[tokio::test]
    async fn test_missing_program_reference_uses_category() {
        let mut fx = scenario_a();
        fx.offering.program_id = None;
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        let code = assigner.assign(&mut fx.offering).await.unwrap();
        assert_eq!(code, "INE0125ASSA");
    }

    #[tokio::test]
    async fn test_failing_directories_degrade_to_fallbacks() {
        let mut fx = scenario_a();
        fx.programs.broken = true;
        fx.users.broken = true;
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        let code = assigner.assign(&mut fx.offering).await.unwrap();
        assert_eq!(code, "INE0125XXSA");
    }

    #[tokio::test]
    async fn test_one_failing_lookup_does_not_affect_the_other() {
        let mut fx = scenario_a();
        fx.users.broken = true;
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        let code = assigner.assign(&mut fx.offering).await.unwrap();
        assert_eq!(code, "PME0125XXSA");
    }

    #[tokio::test]
    async fn test_slow_lookups_time_out() {
        let mut fx = scenario_a();
        fx.programs.slow = true;
        fx.users.slow = true;
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users)
            .with_timeout(Duration::from_millis(20));

        let code = assigner.assign(&mut fx.offering).await.unwrap();
        assert_eq!(code, "INE0125XXSA");
    }

    #[tokio::test]
    async fn test_assign_is_idempotent() {
        let mut fx = scenario_a();
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);
        assigner.assign(&mut fx.offering).await;

        fx.offering.campus = Some("Online".into());
        fx.offering.language = Language::Spanish;
        let second = assigner.assign(&mut fx.offering).await;

        assert!(second.is_none());
        assert_eq!(fx.offering.identifier.as_deref(), Some("PME0125ASSA"));
    }

    #[tokio::test]
    async fn test_existing_identifier_never_overwritten() {
        let mut fx = scenario_a();
        fx.offering.identifier = Some("LEGACY-CODE".into());
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        assert!(assigner.assign(&mut fx.offering).await.is_none());
        assert_eq!(fx.offering.identifier.as_deref(), Some("LEGACY-CODE"));
    }

    #[tokio::test]
    async fn test_blank_identifier_is_assigned() {
        let mut fx = scenario_a();
        fx.offering.identifier = Some(String::new());
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        assert_eq!(
            assigner.assign(&mut fx.offering).await.as_deref(),
            Some("PME0125ASSA")
        );
    }

    #[tokio::test]
    async fn test_no_start_date_is_a_noop() {
        let mut fx = scenario_a();
        fx.offering.start_date = None;
        let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);

        assert!(assigner.assign(&mut fx.offering).await.is_none());
        assert!(fx.offering.identifier.is_none());
    }

    #[tokio::test]
    async fn test_generated_codes_match_wire_format() {
        let pattern = Regex::new(r"^[A-Z0-9]{2}[ES]\d{4}[A-Z]{2}[A-Z0-9]{2}$").unwrap();
        let campuses = [None, Some("Santa Ana"), Some("Main St."), Some("é"), Some("9th Ave")];
        let names = ["Professional Makeup Artistry", "x", "", "Über Nails & Co", "2-Day Intensive"];
        let people = [("Alina", "Santiago"), ("", ""), ("Ángela", "4th"), ("-", "Ruiz")];

        for campus in campuses {
            for name in names {
                for (first, last) in people {
                    let mut fx = scenario_a();
                    let program_id = fx.offering.program_id.unwrap();
                    let instructor_id = fx.offering.instructor_id.unwrap();
                    fx.programs.known.insert(program_id, name.into());
                    fx.users
                        .known
                        .insert(instructor_id, (first.into(), last.into()));
                    fx.offering.campus = campus.map(String::from);

                    let assigner = IdentifierAssigner::new(&fx.programs, &fx.users);
                    let code = assigner.assign(&mut fx.offering).await.unwrap();

                    assert!(pattern.is_match(&code), "malformed code {code}");
                    assert!(is_well_formed(&code));
                }
            }
        }
    }
}
