use crate::domain::users::Student;

#[derive(Debug, Clone)]
pub struct StudentProfileDto {
    pub student: Student,
    pub accolades: Vec<i32>,
    pub next_milestone: Option<i32>,
}

impl From<Student> for StudentProfileDto {
    fn from(student: Student) -> Self {
        let accolades = student.accolades();
        let next_milestone = student.next_milestone();
        StudentProfileDto {
            student,
            accolades,
            next_milestone,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccoladesDto {
    pub total_hours: i32,
    pub accolades: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct LeaderboardEntryDto {
    /// 1-based position
    pub rank: usize,
    pub id: i64,
    pub username: String,
    pub name: String,
    pub total_hours: i32,
}
