use crate::application::dto::students::AccoladesDto;
use crate::application::ports::student_repository::StudentRepository;

pub struct GetAccolades<'a, S: StudentRepository + ?Sized> {
    pub students: &'a S,
}

impl<'a, S: StudentRepository + ?Sized> GetAccolades<'a, S> {
    pub async fn execute(&self, student_id: i64) -> anyhow::Result<Option<AccoladesDto>> {
        let student = self.students.find_student(student_id).await?;
        Ok(student.map(|s| AccoladesDto {
            total_hours: s.total_hours,
            accolades: s.accolades(),
        }))
    }
}
