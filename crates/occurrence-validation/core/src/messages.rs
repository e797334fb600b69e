//! Error messages rendered next to each field

pub const PATIENT_NAME_BLANK: &str = "Nome do paciente não pode ser vazio ou apenas espaços.";
pub const DESCRIPTION_BLANK: &str =
    "Descrição da ocorrência não pode ser vazia ou apenas espaços.";
pub const IMMEDIATE_ACTION_BLANK: &str = "Ação imediata não pode ser vazia ou apenas espaços.";

pub const ATTENDANCE_DIGITS: &str =
    "Atendimento deve conter apenas números e ter pelo menos 5 dígitos.";
pub const RECORD_DIGITS: &str = "Registro deve conter apenas números e ter pelo menos 5 dígitos.";

pub const BIRTH_DATE_FUTURE: &str = "Data de nascimento não pode ser maior que a data atual.";
pub const BIRTH_DATE_TOO_OLD: &str = "Data de nascimento não pode ser menor que 1900.";

pub const INTERNMENT_DATE_FUTURE: &str = "Data de internação não pode ser maior que a data atual.";
pub const INTERNMENT_DATE_TOO_OLD: &str = "Data de internação não pode ser menor que 2000.";

pub const OCCURRENCE_DATE_FUTURE: &str = "Data da ocorrência não pode ser maior que a data atual.";
pub const OCCURRENCE_DATE_TOO_OLD: &str = "Data da ocorrência não pode ser menor que 2010.";

pub const OCCURRENCE_TIME_FUTURE: &str =
    "A hora da ocorrência não pode ser maior que a hora atual.";

pub const INTERNMENT_BEFORE_BIRTH: &str =
    "Data de internação não pode ser menor que a data de nascimento.";

pub const INVALID_DATE: &str = "Data inválida.";
pub const INVALID_TIME: &str = "Hora inválida.";
