//! File-based Store Adapter
//!
//! Persists each collection as one YAML file under a base directory:
//!
//! ```text
//! data/
//! ├── templates.yaml   # list, creation order
//! ├── profile.yaml     # user id -> profile
//! ├── responses.yaml   # list, append order
//! └── attempts.yaml    # attempt id -> attempt
//! ```
//!
//! A missing or empty file reads as an empty collection. Writes are
//! serialized through one lock and land via write-then-rename.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::{AttemptId, DomainError, TemplateId, UserId};
use crate::domain::survey::{SurveyAttempt, SurveyResponse};
use crate::domain::template::SurveyTemplate;
use crate::domain::user::UserProfile;
use crate::ports::{
    next_attempt_write, next_profile_version, AttemptRepository, AttemptWrite, ProfileRepository,
    ResponseRepository, StorageError, TemplateRepository,
};

const TEMPLATES_FILE: &str = "templates.yaml";
const PROFILE_FILE: &str = "profile.yaml";
const RESPONSES_FILE: &str = "responses.yaml";
const ATTEMPTS_FILE: &str = "attempts.yaml";

/// YAML file storage for all repositories.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Create a store rooted at `base_path`; the directory is created on
    /// first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path(&self, file: &str) -> PathBuf {
        self.base_path.join(file)
    }

    async fn read<T>(&self, file: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let yaml = match fs::read_to_string(self.path(file)).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };
        if yaml.trim().is_empty() {
            return Ok(T::default());
        }

        serde_yaml::from_str(&yaml).map_err(|e| StorageError::deserialization(file, e))
    }

    async fn write<T>(&self, file: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        fs::create_dir_all(&self.base_path).await?;

        let yaml = serde_yaml::to_string(value).map_err(|e| StorageError::serialization(file, e))?;
        let target = self.path(file);
        let staging = self.path(&format!("{}.tmp", file));
        fs::write(&staging, yaml).await?;
        fs::rename(&staging, &target).await?;

        tracing::debug!(file = %target.display(), "Wrote store file");
        Ok(())
    }
}

#[async_trait]
impl TemplateRepository for FileStore {
    async fn list(&self) -> Result<Vec<SurveyTemplate>, DomainError> {
        Ok(self.read(TEMPLATES_FILE).await?)
    }

    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<SurveyTemplate>, DomainError> {
        let templates: Vec<SurveyTemplate> = self.read(TEMPLATES_FILE).await?;
        Ok(templates.into_iter().find(|t| t.id() == id))
    }

    async fn save(&self, template: &SurveyTemplate) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut templates: Vec<SurveyTemplate> = self.read(TEMPLATES_FILE).await?;
        match templates.iter_mut().find(|t| t.id() == template.id()) {
            Some(existing) => *existing = template.clone(),
            None => templates.push(template.clone()),
        }
        Ok(self.write(TEMPLATES_FILE, &templates).await?)
    }
}

#[async_trait]
impl ProfileRepository for FileStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let mut profiles: BTreeMap<UserId, UserProfile> = self.read(PROFILE_FILE).await?;
        Ok(profiles.remove(user_id))
    }

    async fn save(&self, profile: UserProfile) -> Result<UserProfile, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut profiles: BTreeMap<UserId, UserProfile> = self.read(PROFILE_FILE).await?;
        let stored = profiles.get(profile.id()).map(UserProfile::version);
        let version = next_profile_version(stored, &profile)?;

        let saved = profile.with_version(version);
        profiles.insert(saved.id().clone(), saved.clone());
        self.write(PROFILE_FILE, &profiles).await?;
        Ok(saved)
    }
}

#[async_trait]
impl ResponseRepository for FileStore {
    async fn list(&self) -> Result<Vec<SurveyResponse>, DomainError> {
        Ok(self.read(RESPONSES_FILE).await?)
    }

    async fn append(&self, response: &SurveyResponse) -> Result<SurveyResponse, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut responses: Vec<SurveyResponse> = self.read(RESPONSES_FILE).await?;
        if let Some(existing) = responses.iter().find(|r| r.id() == response.id()) {
            return Ok(existing.clone());
        }
        responses.push(response.clone());
        self.write(RESPONSES_FILE, &responses).await?;
        Ok(response.clone())
    }
}

#[async_trait]
impl AttemptRepository for FileStore {
    async fn find_by_id(&self, id: &AttemptId) -> Result<Option<SurveyAttempt>, DomainError> {
        let mut attempts: BTreeMap<AttemptId, SurveyAttempt> = self.read(ATTEMPTS_FILE).await?;
        Ok(attempts.remove(id))
    }

    async fn save(&self, attempt: SurveyAttempt) -> Result<SurveyAttempt, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut attempts: BTreeMap<AttemptId, SurveyAttempt> = self.read(ATTEMPTS_FILE).await?;
        let stored = attempts.get(attempt.id()).map(SurveyAttempt::version);

        let saved = match next_attempt_write(stored, attempt)? {
            AttemptWrite::Store(saved) => {
                attempts.insert(*saved.id(), saved.clone());
                saved
            }
            AttemptWrite::Evict(saved) => {
                attempts.remove(saved.id());
                saved
            }
        };
        self.write(ATTEMPTS_FILE, &attempts).await?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, OutcomeId, Rating, Timestamp};
    use crate::domain::survey::{Answer, Question, QuestionOption, QuestionSet};
    use crate::domain::template::{Outcome, QuestionCount};
    use crate::domain::user::apply_survey_result;
    use tempfile::TempDir;

    fn template() -> SurveyTemplate {
        SurveyTemplate::new(
            TemplateId::new("t-houses").unwrap(),
            "Hogwarts House",
            QuestionCount::new(3).unwrap(),
            vec![
                Outcome::new(OutcomeId::new("a").unwrap(), "Gryffindor", vec!["Brave".into()])
                    .unwrap(),
                Outcome::new(OutcomeId::new("b").unwrap(), "Slytherin", vec![]).unwrap(),
            ],
            Timestamp::now(),
        )
        .unwrap()
    }

    fn attempt() -> SurveyAttempt {
        let template = template();
        let questions = (1..=3)
            .map(|id| Question {
                id,
                text: format!("Q{}", id),
                options: ["a", "b", "a", "b"]
                    .iter()
                    .map(|o| QuestionOption {
                        text: format!("pick {}", o),
                        outcome_id: OutcomeId::new(*o).unwrap(),
                    })
                    .collect(),
            })
            .collect();
        let set = QuestionSet::validated(&template, questions).unwrap();
        SurveyAttempt::start(template, UserId::new("user-1").unwrap(), set)
    }

    #[tokio::test]
    async fn missing_files_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("not-yet-created"));

        assert!(TemplateRepository::list(&store).await.unwrap().is_empty());
        assert!(ResponseRepository::list(&store).await.unwrap().is_empty());
        let profile = store
            .find_or_default(&UserId::new("user-1").unwrap())
            .await
            .unwrap();
        assert_eq!(profile.name(), "Alex Johnson");
    }

    #[tokio::test]
    async fn templates_survive_a_new_store_instance() {
        let dir = TempDir::new().unwrap();
        let original = template();
        TemplateRepository::save(&FileStore::new(dir.path()), &original)
            .await
            .unwrap();

        let reopened = FileStore::new(dir.path());
        let found = TemplateRepository::find_by_id(&reopened, original.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, original);
        assert!(dir.path().join("templates.yaml").exists());
    }

    #[tokio::test]
    async fn profile_versions_are_checked_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let saved = ProfileRepository::save(&store, UserProfile::default())
            .await
            .unwrap();
        let updated =
            apply_survey_result(saved.clone(), &TemplateId::new("t-1").unwrap(), "Cat").unwrap();
        ProfileRepository::save(&store, updated).await.unwrap();

        let err = ProfileRepository::save(&store, saved).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);

        let stored = store
            .find(&UserId::new("user-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.version().as_u64(), 2);
        assert_eq!(stored.history_for(&TemplateId::new("t-1").unwrap()), Some("Cat"));
    }

    #[tokio::test]
    async fn responses_append_in_order() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        for result in ["Gryffindor", "Slytherin"] {
            let response = SurveyResponse::new(
                TemplateId::new("t-houses").unwrap(),
                UserId::new("user-1").unwrap(),
                "Alex Johnson",
                result,
                Rating::new(5).unwrap(),
            );
            store.append(&response).await.unwrap();
        }

        let results: Vec<_> = ResponseRepository::list(&store)
            .await
            .unwrap()
            .iter()
            .map(|r| r.result().to_string())
            .collect();
        assert_eq!(results, vec!["Gryffindor", "Slytherin"]);
    }

    #[tokio::test]
    async fn attempts_round_trip_with_progress() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let mut attempt = attempt();
        attempt
            .answer(Answer::new(1, OutcomeId::new("b").unwrap()))
            .unwrap();
        let saved = AttemptRepository::save(&store, attempt).await.unwrap();

        let loaded = AttemptRepository::find_by_id(&store, saved.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.version().as_u64(), 1);
    }

    #[tokio::test]
    async fn submitted_attempts_are_compacted_out_of_the_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let open = AttemptRepository::save(&store, attempt()).await.unwrap();
        let mut done = AttemptRepository::save(&store, attempt()).await.unwrap();
        for id in 1..=3 {
            done.answer(Answer::new(id, OutcomeId::new("a").unwrap()))
                .unwrap();
        }
        done.rate(Rating::new(4).unwrap()).unwrap();
        let response = done.submit("Alex Johnson").unwrap();
        AttemptRepository::save(&store, done.clone()).await.unwrap();
        store.append(&response).await.unwrap();

        let on_disk: BTreeMap<AttemptId, SurveyAttempt> =
            serde_yaml::from_str(&std::fs::read_to_string(dir.path().join("attempts.yaml")).unwrap())
                .unwrap();
        assert_eq!(on_disk.keys().collect::<Vec<_>>(), vec![open.id()]);
        assert_eq!(ResponseRepository::list(&store).await.unwrap().len(), 1);

        let err = AttemptRepository::save(&store, done).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
    }

    #[tokio::test]
    async fn concurrent_attempt_saves_admit_one_writer() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let base = AttemptRepository::save(&store, attempt()).await.unwrap();

        let mut first = base.clone();
        let mut second = base;
        first.answer(Answer::new(1, OutcomeId::new("a").unwrap())).unwrap();
        second.answer(Answer::new(1, OutcomeId::new("b").unwrap())).unwrap();

        let (a, b) = tokio::join!(
            AttemptRepository::save(&store, first),
            AttemptRepository::save(&store, second)
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let err = a.err().or(b.err()).unwrap();
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
    }

    #[tokio::test]
    async fn corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("responses.yaml"), "{not: [valid").unwrap();
        let store = FileStore::new(dir.path());

        let err = ResponseRepository::list(&store).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageError);
    }
}
