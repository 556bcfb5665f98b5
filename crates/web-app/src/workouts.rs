use chrono::{DateTime, Utc};
use reisfit_domain::{self as domain, WorkoutRepository, WorkoutService};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutList {
    pub workouts: Vec<domain::Workout>,
}

impl WorkoutList {
    pub async fn load<R: WorkoutRepository>(
        service: &domain::Service<R>,
    ) -> Result<Self, domain::ReadError> {
        Ok(Self {
            workouts: service.get_workouts().await?,
        })
    }

    /// Delete a workout and reload the list.
    ///
    /// Sessions of the workout are kept.
    pub async fn delete<R: WorkoutRepository>(
        &mut self,
        service: &domain::Service<R>,
        id: domain::WorkoutID,
    ) -> Result<(), domain::DeleteError> {
        service.delete_workout(id).await?;
        self.workouts.retain(|w| w.id != id);
        Ok(())
    }
}

/// Badge of the workout category, e.g. "TREINO A".
#[must_use]
pub fn category_label(category: domain::Category) -> Option<String> {
    match category {
        domain::Category::None => None,
        _ => Some(format!("TREINO {}", category.name().to_uppercase())),
    }
}

#[must_use]
pub fn exercise_count_label(workout: &domain::Workout) -> String {
    format!("{} exercícios", workout.num_exercises())
}

/// State of the workout editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    pub draft: domain::WorkoutDraft,
    pub tag_input: String,
}

impl Editor {
    #[must_use]
    pub fn new(workout: Option<&domain::Workout>) -> Self {
        Self {
            draft: workout.map_or_else(domain::WorkoutDraft::new, domain::WorkoutDraft::from),
            tag_input: String::new(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.draft.is_new() {
            "Novo Treino"
        } else {
            "Editar Treino"
        }
    }

    #[must_use]
    pub fn tag_suggestions(&self) -> Vec<&'static str> {
        self.draft.muscle_groups.suggestions(&self.tag_input)
    }

    /// Techniques matching the technique of a group, all of them if it is empty.
    #[must_use]
    pub fn technique_suggestions(&self, group_idx: usize) -> Vec<&'static str> {
        let Some(group) = self.draft.exercise_groups.get(group_idx) else {
            return vec![];
        };
        let input = group.technique.trim().to_lowercase();
        domain::TECHNIQUES
            .iter()
            .filter(|t| {
                let technique = t.to_lowercase();
                technique.starts_with(&input) && technique != input
            })
            .copied()
            .collect()
    }

    /// Add the current input as a tag and clear the input.
    pub fn add_tag(&mut self) -> bool {
        let added = self.draft.muscle_groups.add(&self.tag_input);
        if added {
            self.tag_input.clear();
        }
        added
    }

    pub fn select_suggestion(&mut self, tag: &str) {
        self.draft.muscle_groups.add(tag);
        self.tag_input.clear();
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.draft.muscle_groups.remove(tag);
    }

    /// Store the draft as a new workout or replace the edited one.
    pub async fn save<R: WorkoutRepository>(
        &self,
        service: &domain::Service<R>,
        now: DateTime<Utc>,
    ) -> Result<domain::Workout, SaveError> {
        service.validate_workout_name(&self.draft.name)?;
        let workout = self.draft.clone().into_workout(now)?;
        if self.draft.is_new() {
            Ok(service.create_workout(workout).await?)
        } else {
            Ok(service.replace_workout(workout).await?)
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] domain::ValidationError),
    #[error(transparent)]
    Draft(#[from] domain::WorkoutDraftError),
    #[error(transparent)]
    Create(#[from] domain::CreateError),
    #[error(transparent)]
    Update(#[from] domain::UpdateError),
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::{SESSION, WORKOUT, WORKOUT_2, service, snapshot};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let service = service(snapshot());
        let mut list = WorkoutList::load(&service).await.unwrap();
        assert_eq!(list.workouts, vec![WORKOUT.clone(), WORKOUT_2.clone()]);

        list.delete(&service, WORKOUT.id).await.unwrap();

        assert_eq!(list.workouts, vec![WORKOUT_2.clone()]);
        assert_eq!(
            WorkoutList::load(&service).await.unwrap().workouts,
            vec![WORKOUT_2.clone()]
        );
        assert_eq!(
            domain::SessionService::get_sessions(&service).await.unwrap(),
            vec![SESSION.clone()]
        );
    }

    #[rstest]
    #[case(domain::Category::A, Some("TREINO A"))]
    #[case(domain::Category::FullBody, Some("TREINO FULL BODY"))]
    #[case(domain::Category::None, None)]
    fn test_category_label(#[case] category: domain::Category, #[case] expected: Option<&str>) {
        assert_eq!(category_label(category).as_deref(), expected);
    }

    #[test]
    fn test_exercise_count_label() {
        assert_eq!(exercise_count_label(&WORKOUT), "3 exercícios");
    }

    #[test]
    fn test_tags() {
        let mut editor = Editor::new(None);
        editor.tag_input = "p".to_string();
        assert_eq!(
            editor.tag_suggestions(),
            vec!["Peito", "Pernas", "Panturrilhas"]
        );

        editor.select_suggestion("Peito");
        assert_eq!(editor.tag_input, "");
        editor.tag_input = "P".to_string();
        assert_eq!(editor.tag_suggestions(), vec!["Pernas", "Panturrilhas"]);

        editor.tag_input = " Peito ".to_string();
        assert!(!editor.add_tag());
        assert_eq!(editor.tag_input, " Peito ");

        editor.tag_input = "Serrátil".to_string();
        assert!(editor.add_tag());
        assert_eq!(
            editor.draft.muscle_groups.iter().collect::<Vec<_>>(),
            vec!["Peito", "Serrátil"]
        );

        editor.remove_tag("Peito");
        assert_eq!(
            editor.draft.muscle_groups.iter().collect::<Vec<_>>(),
            vec!["Serrátil"]
        );
    }

    #[test]
    fn test_technique_suggestions() {
        let mut editor = Editor::new(Some(&WORKOUT));
        assert_eq!(editor.technique_suggestions(1), Vec::<&str>::new());

        editor.draft.exercise_groups[1].technique = "tri".to_string();
        assert_eq!(editor.technique_suggestions(1), vec!["Tri-set"]);

        editor.draft.exercise_groups[1].technique = "  ".to_string();
        assert_eq!(editor.technique_suggestions(1), domain::TECHNIQUES.to_vec());

        assert!(editor.technique_suggestions(5).is_empty());
    }

    #[tokio::test]
    async fn test_save_new() {
        let service = service(domain::Snapshot::default());
        let mut editor = Editor::new(None);
        assert_eq!(editor.title(), "Novo Treino");
        editor.draft.name = "Treino C".to_string();
        editor.draft.add_group();

        let workout = editor.save(&service, now()).await.unwrap();

        assert_eq!(workout.name.to_string(), "Treino C");
        assert_eq!(workout.created_at, now());
        assert_eq!(workout.num_exercises(), 1);
        assert_eq!(service.get_workouts().await.unwrap(), vec![workout]);
    }

    #[tokio::test]
    async fn test_save_existing() {
        let service = service(snapshot());
        let mut editor = Editor::new(Some(&WORKOUT));
        assert_eq!(editor.title(), "Editar Treino");
        editor.draft.name = "Treino A+".to_string();
        editor.draft.remove_group(1);

        let workout = editor.save(&service, now()).await.unwrap();

        assert_eq!(workout.id, WORKOUT.id);
        assert_eq!(workout.created_at, WORKOUT.created_at);
        assert_eq!(workout.num_exercises(), 1);
        assert_eq!(service.get_workout(WORKOUT.id).await.unwrap(), workout);
    }

    #[tokio::test]
    async fn test_save_without_name() {
        let service = service(domain::Snapshot::default());
        let editor = Editor::new(None);

        let Err(SaveError::Validation(err)) = editor.save(&service, now()).await else {
            panic!("expected validation error");
        };

        assert_eq!(err.to_string(), "Por favor, dê um nome ao treino.");
        assert!(service.get_workouts().await.unwrap().is_empty());
    }
}
