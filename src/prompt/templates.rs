//! Built-in prompt templates.
//!
//! The product speaks Brazilian Portuguese, so the instructions sent to the
//! model do too. Placeholders use the `{NAME}` form understood by
//! [`TemplateEngine`](super::TemplateEngine).

/// An immutable, statically owned prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub body: &'static str,
    /// Placeholder keys a caller is expected to bind.
    pub placeholders: &'static [&'static str],
}

pub const CLASSIFICATION: PromptTemplate = PromptTemplate {
    name: "classification",
    body: CLASSIFICATION_BODY,
    placeholders: &["EMAIL"],
};

pub const REVISION: PromptTemplate = PromptTemplate {
    name: "revision",
    body: REVISION_BODY,
    placeholders: &["ACAO", "TEXTO"],
};

pub const ALL: [PromptTemplate; 2] = [CLASSIFICATION, REVISION];

const CLASSIFICATION_BODY: &str = r#"Você é um assistente especializado em classificação e resposta de emails. Sua tarefa é: (1) classificar o email recebido como Produtivo ou Improdutivo e (2) gerar uma resposta automática apropriada à classificação.

Definições:
Produtivo: o email exige ação, tomada de decisão ou resposta específica. Exemplos: dúvidas sobre o sistema, solicitações de suporte, pedidos de status, envio de documentos, reclamações.
Improdutivo: o email não exige ação ou resposta obrigatória. Exemplos: agradecimentos, mensagens motivacionais, cumprimentos, avisos informativos sem solicitação.

Formato de resposta (retorne exatamente este JSON):
{
"categoria": "Produtivo" ou "Improdutivo",
"resposta": "Texto da resposta sugerida"
}

Regras:
- O valor de "categoria" deve ser exatamente "Produtivo" ou "Improdutivo".
- Se a classificação for Produtivo, gere uma resposta educada e direta, solicitando informações ou oferecendo solução.
- Se for Improdutivo, gere uma resposta curta e cordial. A resposta nunca pode ser vazia.
- Não inclua explicações fora do JSON.
- Não acrescente nada além do JSON.

Email para análise:
<<<
{EMAIL}
>>>
"#;

const REVISION_BODY: &str = r#"Você é um assistente de redação. Aplique a instrução abaixo ao texto fornecido.

Instrução: {ACAO}

Texto:
<<<
{TEXTO}
>>>

Retorne somente o texto revisado, sem comentários, sem aspas e sem formatação adicional.
"#;
