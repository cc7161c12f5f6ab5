use std::error::Error;

use rusqlite::{Connection, Row};
use sea_query::{Expr, Iden, Order, Query, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use tracing::{debug, instrument};

use super::{Workout, WorkoutEntry};
use crate::api::{error::ServerError, response_errors::WorkoutError};

#[derive(Iden)]
pub enum Workouts {
    Table,
    Id,
    Title,
    Description,
    DurationMinutes,
    CaloriesBurned,
}

#[derive(Iden)]
pub enum WorkoutEntries {
    Table,
    Id,
    WorkoutId,
    ExerciseName,
    Sets,
    Reps,
    DurationSeconds,
    Weight,
    Notes,
    OrderIndex,
}

impl Workout {
    /// Reads the parent columns from a joined row (columns 0..=4)
    fn from_joined_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            duration_minutes: row.get(3)?,
            calories_burned: row.get(4)?,
            entries: Vec::new(),
        })
    }

    /// Fetches a workout and its entries (ordered by `order_index`) with a
    /// single outer join. `None` if no workout has that id.
    #[instrument(skip(conn))]
    pub fn fetch<T: Error>(conn: &Connection, id: i64) -> Result<Option<Workout>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns([
                (Workouts::Table, Workouts::Id),
                (Workouts::Table, Workouts::Title),
                (Workouts::Table, Workouts::Description),
                (Workouts::Table, Workouts::DurationMinutes),
                (Workouts::Table, Workouts::CaloriesBurned),
            ])
            .columns([
                (WorkoutEntries::Table, WorkoutEntries::Id),
                (WorkoutEntries::Table, WorkoutEntries::ExerciseName),
                (WorkoutEntries::Table, WorkoutEntries::Sets),
                (WorkoutEntries::Table, WorkoutEntries::Reps),
                (WorkoutEntries::Table, WorkoutEntries::DurationSeconds),
                (WorkoutEntries::Table, WorkoutEntries::Weight),
                (WorkoutEntries::Table, WorkoutEntries::Notes),
                (WorkoutEntries::Table, WorkoutEntries::OrderIndex),
            ])
            .from(Workouts::Table)
            .left_join(
                WorkoutEntries::Table,
                Expr::col((WorkoutEntries::Table, WorkoutEntries::WorkoutId))
                    .equals((Workouts::Table, Workouts::Id)),
            )
            .and_where(Expr::col((Workouts::Table, Workouts::Id)).eq(id))
            .order_by((WorkoutEntries::Table, WorkoutEntries::OrderIndex), Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let mut rows = stmt.query(&*values.as_params())?;

        let mut workout: Option<Workout> = None;
        while let Some(row) = rows.next()? {
            // Parent columns repeat on every row, only the first is read
            if workout.is_none() {
                workout = Some(Workout::from_joined_row(row)?);
            }
            if let (Some(workout), Some(entry)) =
                (workout.as_mut(), WorkoutEntry::from_joined_row(row)?)
            {
                workout.entries.push(entry);
            }
        }

        Ok(workout)
    }

    /// Inserts the workout and all of its entries in one transaction and
    /// returns it with every id filled in.
    #[instrument(skip(conn, workout), fields(title = %workout.title, entries = workout.entries.len()))]
    pub fn create<T: Error>(
        conn: &mut Connection,
        mut workout: Workout,
    ) -> Result<Workout, ServerError<T>> {
        let tx = conn.transaction()?;
        workout.id = insert_workout(&tx, &workout)?;
        insert_entries(&tx, workout.id, &mut workout.entries)?;
        tx.commit()?;

        debug!(id = workout.id, "Created workout");
        Ok(workout)
    }

    /// Writes the scalar fields and replaces every entry. Entries get fresh
    /// ids, which are written back onto `workout`.
    #[instrument(skip(conn, workout), fields(id = workout.id, entries = workout.entries.len()))]
    pub fn update(
        conn: &mut Connection,
        workout: &mut Workout,
    ) -> Result<(), ServerError<WorkoutError>> {
        let tx = conn.transaction()?;

        if update_workout(&tx, workout)? == 0 {
            // Dropping the transaction rolls it back
            return Err(WorkoutError::NotFound { id: workout.id }.into());
        }

        delete_entries(&tx, workout.id)?;
        insert_entries(&tx, workout.id, &mut workout.entries)?;
        tx.commit()?;

        Ok(())
    }

    /// Writes only the scalar fields. Stored entries, and their ids, are left
    /// as they are.
    #[instrument(skip(conn, workout), fields(id = workout.id))]
    pub fn update_details(
        conn: &Connection,
        workout: &Workout,
    ) -> Result<(), ServerError<WorkoutError>> {
        if update_workout(conn, workout)? == 0 {
            Err(WorkoutError::NotFound { id: workout.id })?;
        }

        Ok(())
    }

    /// Deletes the workout. Entries are removed by the `ON DELETE CASCADE`
    /// on `workout_entries.workout_id`.
    #[instrument(skip(conn))]
    pub fn delete(conn: &Connection, id: i64) -> Result<(), ServerError<WorkoutError>> {
        let (sql, values) = Query::delete()
            .from_table(Workouts::Table)
            .and_where(Expr::col(Workouts::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        if stmt.execute(&*values.as_params())? == 0 {
            Err(WorkoutError::NotFound { id })?;
        }

        Ok(())
    }
}

impl WorkoutEntry {
    /// Reads the entry columns from a joined row (columns 5..=12). The outer
    /// join gives a row of NULLs when the workout has no entries, which is
    /// reported as `None`.
    fn from_joined_row(row: &Row) -> rusqlite::Result<Option<Self>> {
        let id: Option<i64> = row.get(5)?;
        let Some(id) = id.filter(|id| *id != 0) else {
            return Ok(None);
        };

        Ok(Some(Self {
            id,
            exercise_name: row.get(6)?,
            sets: row.get(7)?,
            reps: row.get(8)?,
            duration_seconds: row.get(9)?,
            weight: row.get(10)?,
            notes: row.get(11)?,
            order_index: row.get(12)?,
        }))
    }
}

fn insert_workout(conn: &Connection, workout: &Workout) -> Result<i64, rusqlite::Error> {
    let (sql, values) = Query::insert()
        .into_table(Workouts::Table)
        .columns([
            Workouts::Title,
            Workouts::Description,
            Workouts::DurationMinutes,
            Workouts::CaloriesBurned,
        ])
        .values_panic([
            workout.title.as_str().into(),
            workout.description.as_str().into(),
            workout.duration_minutes.into(),
            workout.calories_burned.into(),
        ])
        .build_rusqlite(SqliteQueryBuilder);

    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.execute(&*values.as_params())?;
    Ok(conn.last_insert_rowid())
}

fn update_workout(conn: &Connection, workout: &Workout) -> Result<usize, rusqlite::Error> {
    let (sql, values) = Query::update()
        .table(Workouts::Table)
        .values([
            (Workouts::Title, workout.title.as_str().into()),
            (Workouts::Description, workout.description.as_str().into()),
            (Workouts::DurationMinutes, workout.duration_minutes.into()),
            (Workouts::CaloriesBurned, workout.calories_burned.into()),
        ])
        .and_where(Expr::col(Workouts::Id).eq(workout.id))
        .build_rusqlite(SqliteQueryBuilder);

    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.execute(&*values.as_params())
}

fn insert_entries(
    conn: &Connection,
    workout_id: i64,
    entries: &mut [WorkoutEntry],
) -> Result<(), rusqlite::Error> {
    for entry in entries.iter_mut() {
        let (sql, values) = Query::insert()
            .into_table(WorkoutEntries::Table)
            .columns([
                WorkoutEntries::WorkoutId,
                WorkoutEntries::ExerciseName,
                WorkoutEntries::Sets,
                WorkoutEntries::Reps,
                WorkoutEntries::DurationSeconds,
                WorkoutEntries::Weight,
                WorkoutEntries::Notes,
                WorkoutEntries::OrderIndex,
            ])
            .values_panic([
                workout_id.into(),
                entry.exercise_name.as_str().into(),
                entry.sets.into(),
                entry.reps.into(),
                entry.duration_seconds.into(),
                entry.weight.into(),
                entry.notes.as_str().into(),
                entry.order_index.into(),
            ])
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;
        entry.id = conn.last_insert_rowid();
    }

    Ok(())
}

fn delete_entries(conn: &Connection, workout_id: i64) -> Result<usize, rusqlite::Error> {
    let (sql, values) = Query::delete()
        .from_table(WorkoutEntries::Table)
        .and_where(Expr::col(WorkoutEntries::WorkoutId).eq(workout_id))
        .build_rusqlite(SqliteQueryBuilder);

    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.execute(&*values.as_params())
}
