use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgument, PubSubError};

/// Входящий лид: полезная нагрузка, которую публикуют в брокер.
///
/// Для брокера значимо только поле `first_name`: оно играет роль
/// обязательного имени сообщения. Остальные поля переносятся как есть.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default, alias = "FirstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "LastName")]
    pub last_name: Option<String>,
    #[serde(default, alias = "Company")]
    pub company: Option<String>,
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
}

impl Lead {
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            ..Self::default()
        }
    }

    pub fn with_last_name(
        mut self,
        last_name: impl Into<String>,
    ) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_company(
        mut self,
        company: impl Into<String>,
    ) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_email(
        mut self,
        email: impl Into<String>,
    ) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Обязательное имя сообщения, если оно задано и не пустое.
    pub fn name(&self) -> Option<&str> {
        self.first_name.as_deref().filter(|n| !n.is_empty())
    }

    /// Проверяет обязательное поле имени.
    pub fn validate(&self) -> Result<(), PubSubError> {
        match self.name() {
            Some(_) => Ok(()),
            None => Err(InvalidArgument::EmptyField("first_name").into()),
        }
    }

    /// Разбирает лид из JSON.
    ///
    /// JSON `null` означает отсутствующее сообщение и даёт `Ok(None)`.
    pub fn from_json(input: &str) -> Result<Option<Self>, serde_json::Error> {
        serde_json::from_str(input)
    }
}
