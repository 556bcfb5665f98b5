use chrono::{TimeZone, Utc};
use reisfit_domain as domain;

pub static PROFILE: std::sync::LazyLock<domain::UserProfile> =
    std::sync::LazyLock::new(|| domain::UserProfile {
        name: domain::Name::new("Maria").unwrap(),
        sex: domain::Sex::FEMALE,
        activity_level: domain::ActivityLevel::VeryActive,
        weight: Some(62.5),
        height: Some(168.0),
        age: Some(31),
    });

pub static WORKOUT: std::sync::LazyLock<domain::Workout> =
    std::sync::LazyLock::new(|| domain::Workout {
        id: 1.into(),
        name: domain::Name::new("Treino A").unwrap(),
        category: domain::Category::A,
        muscle_groups: ["Peito", "Tríceps"].into_iter().collect(),
        exercise_groups: vec![
            domain::ExerciseGroup {
                id: 1.into(),
                technique: String::new(),
                exercises: vec![domain::Exercise {
                    id: 1.into(),
                    name: "Supino Reto".to_string(),
                    sets: 4,
                    reps: domain::Reps::new("8-12"),
                    load: 40.0,
                    rest: 90,
                }],
            },
            domain::ExerciseGroup {
                id: 2.into(),
                technique: "Bi-set".to_string(),
                exercises: vec![
                    domain::Exercise {
                        id: 2.into(),
                        name: "Crucifixo".to_string(),
                        sets: 3,
                        reps: domain::Reps::new("12"),
                        load: 14.0,
                        rest: 0,
                    },
                    domain::Exercise {
                        id: 3.into(),
                        name: "Tríceps Testa".to_string(),
                        sets: 3,
                        reps: domain::Reps::new("10-12"),
                        load: 22.5,
                        rest: 60,
                    },
                ],
            },
        ],
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
    });

pub static WORKOUT_2: std::sync::LazyLock<domain::Workout> =
    std::sync::LazyLock::new(|| domain::Workout {
        id: 2.into(),
        name: domain::Name::new("Treino B").unwrap(),
        category: domain::Category::FullBody,
        muscle_groups: ["Pernas"].into_iter().collect(),
        exercise_groups: vec![domain::ExerciseGroup {
            id: 3.into(),
            technique: String::new(),
            exercises: vec![domain::Exercise {
                id: 4.into(),
                name: "Agachamento".to_string(),
                sets: 5,
                reps: domain::Reps::new("5"),
                load: 100.0,
                rest: 180,
            }],
        }],
        created_at: Utc.with_ymd_and_hms(2024, 1, 16, 10, 0, 0).unwrap(),
    });

pub static SESSION: std::sync::LazyLock<domain::Session> =
    std::sync::LazyLock::new(|| domain::Session {
        id: 1.into(),
        workout_id: 1.into(),
        workout_name: "Treino A".to_string(),
        date: Utc.with_ymd_and_hms(2024, 2, 1, 18, 30, 0).unwrap(),
        duration: 3125,
        performed_exercises: vec![
            domain::PerformedExercise {
                exercise_id: 1.into(),
                name: "Supino Reto".to_string(),
                sets: vec![
                    domain::PerformedSet {
                        reps: 10,
                        load: 40.0,
                    },
                    domain::PerformedSet { reps: 8, load: 42.5 },
                ],
            },
            domain::PerformedExercise {
                exercise_id: 3.into(),
                name: "Tríceps Testa".to_string(),
                sets: vec![domain::PerformedSet {
                    reps: 10,
                    load: 22.5,
                }],
            },
        ],
    });

pub static SESSION_2: std::sync::LazyLock<domain::Session> =
    std::sync::LazyLock::new(|| domain::Session {
        id: 2.into(),
        workout_id: 2.into(),
        workout_name: "Treino B".to_string(),
        date: Utc.with_ymd_and_hms(2024, 2, 3, 7, 15, 0).unwrap(),
        duration: 2400,
        performed_exercises: vec![domain::PerformedExercise {
            exercise_id: 4.into(),
            name: "Agachamento".to_string(),
            sets: vec![
                domain::PerformedSet {
                    reps: 5,
                    load: 100.0,
                };
                5
            ],
        }],
    });

pub static SNAPSHOT: std::sync::LazyLock<domain::Snapshot> =
    std::sync::LazyLock::new(|| domain::Snapshot {
        profile: Some(PROFILE.clone()),
        workouts: vec![WORKOUT.clone(), WORKOUT_2.clone()],
        sessions: vec![SESSION.clone(), SESSION_2.clone()],
    });
