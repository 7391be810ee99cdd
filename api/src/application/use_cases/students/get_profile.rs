use crate::application::dto::students::StudentProfileDto;
use crate::application::ports::student_repository::StudentRepository;

pub struct GetStudentProfile<'a, S: StudentRepository + ?Sized> {
    pub students: &'a S,
}

impl<'a, S: StudentRepository + ?Sized> GetStudentProfile<'a, S> {
    pub async fn execute(&self, student_id: i64) -> anyhow::Result<Option<StudentProfileDto>> {
        let student = self.students.find_student(student_id).await?;
        Ok(student.map(StudentProfileDto::from))
    }
}
