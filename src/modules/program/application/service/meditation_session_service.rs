use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{validate_name, MeditationSession};
use crate::program::application::ports::incoming::use_cases::{
    CreateMeditationSessionRequest, CreateMeditationSessionUseCase, ListMeditationSessionsUseCase,
    MeditationSessionView, ProgramError,
};
use crate::program::application::ports::outgoing::MeditationSessionRepository;

#[derive(Clone)]
pub struct MeditationSessionService<R: MeditationSessionRepository> {
    repository: R,
}

impl<R: MeditationSessionRepository> MeditationSessionService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CreateMeditationSessionUseCase for MeditationSessionService<R>
where
    R: MeditationSessionRepository + Send + Sync,
{
    async fn execute(
        &self,
        instructor: UserId,
        request: CreateMeditationSessionRequest,
    ) -> Result<MeditationSessionView, ProgramError> {
        let name = validate_name(&request.name)?;
        let duration_minutes = MeditationSession::validate_duration(request.duration_minutes)?;
        let focus_points = request
            .focus_points
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        let now = Utc::now();
        let session = MeditationSession {
            id: Uuid::new_v4(),
            instructor_id: instructor,
            name,
            description: request.description,
            duration_minutes,
            session_type: request.session_type,
            guided_script: request.guided_script,
            focus_points,
            background_audio_id: request.background_audio_id,
            guided_audio_id: request.guided_audio_id,
            has_visual_guide: request.has_visual_guide,
            has_ambient_sounds: request.has_ambient_sounds,
            ambient_sound_type: request.ambient_sound_type,
            difficulty: request.difficulty,
            focus_level_assessment: request.focus_level_assessment,
            achievement_criteria: request.achievement_criteria,
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        let saved = self.repository.create_meditation_session(&session).await?;
        tracing::info!(
            session_id = %saved.id,
            user_id = %instructor,
            session_type = %saved.session_type,
            "Meditation session created"
        );
        Ok(MeditationSessionView::from(&saved))
    }
}

#[async_trait]
impl<R> ListMeditationSessionsUseCase for MeditationSessionService<R>
where
    R: MeditationSessionRepository + Send + Sync,
{
    async fn execute(
        &self,
        instructor: UserId,
    ) -> Result<Vec<MeditationSessionView>, ProgramError> {
        let sessions = self.repository.list_meditation_sessions(instructor).await?;
        Ok(sessions.iter().map(MeditationSessionView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::application::domain::{ProgramValidationError, SessionType};
    use crate::program::application::service::test_doubles::InMemoryPrograms;

    #[tokio::test]
    async fn test_create_with_defaults() {
        let service = MeditationSessionService::new(InMemoryPrograms::default());
        let req: CreateMeditationSessionRequest = serde_json::from_value(serde_json::json!({
            "name": "Evening scan",
            "session_type": "body_scan",
            "focus_points": ["feet", "  ", " shoulders "]
        }))
        .unwrap();

        let view = CreateMeditationSessionUseCase::execute(&service, UserId::from(Uuid::new_v4()), req)
            .await
            .unwrap();

        assert_eq!(view.duration_minutes, 10);
        assert_eq!(view.duration_seconds, 600);
        assert_eq!(view.session_type, SessionType::BodyScan);
        assert_eq!(view.focus_points, vec!["feet", "shoulders"]);
    }

    #[tokio::test]
    async fn test_zero_duration_rejected() {
        let service = MeditationSessionService::new(InMemoryPrograms::default());
        let req: CreateMeditationSessionRequest = serde_json::from_value(serde_json::json!({
            "name": "Blink",
            "duration_minutes": 0
        }))
        .unwrap();

        let err = CreateMeditationSessionUseCase::execute(&service, UserId::from(Uuid::new_v4()), req)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProgramError::Validation(ProgramValidationError::MustBePositive("duration_minutes"))
        );
    }
}
