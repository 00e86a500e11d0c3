//! HTML rendering for the server-rendered pages.

use chrono::{DateTime, Utc};

use noticias_core::domain::Noticia;

use crate::middleware::session::Identity;

pub const MSG_LIST_UNAVAILABLE: &str = "Erro ao carregar as notícias.";
pub const MSG_NOTICIA_UNAVAILABLE: &str = "Erro ao carregar ou notícia não encontrada.";

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn nav(identity: Option<&Identity>) -> String {
    match identity {
        Some(identity) => format!(
            r#"<nav><a href="/">Notícias</a> <a href="/criar-noticia">Criar Notícia</a> <span>{}</span> <form method="post" action="/sair" class="inline"><button type="submit">Sair</button></form></nav>"#,
            escape(identity.display_name())
        ),
        None => r#"<nav><a href="/">Notícias</a> <a href="/login">Entrar</a></nav>"#.to_string(),
    }
}

/// Wrap a page body in the common document shell.
pub fn layout(title: &str, identity: Option<&Identity>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<header>{nav}</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        nav = nav(identity),
        body = body,
    )
}

fn error_box(message: &str) -> String {
    format!(r#"<p class="error" role="alert">{}</p>"#, escape(message))
}

/// Home page: latest posts.
pub fn home(noticias: &[Noticia], identity: Option<&Identity>) -> String {
    let mut body = String::from("<h1>Últimas Notícias</h1>\n");

    if noticias.is_empty() {
        body.push_str("<p>Nenhuma notícia publicada.</p>\n");
    }

    for noticia in noticias {
        body.push_str(&format!(
            r#"<article>
<img src="{imagem}" alt="{titulo}">
<h2>{titulo}</h2>
<time datetime="{iso}">{data}</time>
<a href="/noticia/{id}">Leia Mais</a>
</article>
"#,
            imagem = escape(&noticia.imagem),
            titulo = escape(&noticia.titulo),
            iso = noticia.data_publicacao.to_rfc3339(),
            data = format_date(&noticia.data_publicacao),
            id = noticia.id,
        ));
    }

    layout("Notícias", identity, &body)
}

pub fn home_error(identity: Option<&Identity>) -> String {
    layout("Notícias", identity, &error_box(MSG_LIST_UNAVAILABLE))
}

/// Detail page. Edit and delete controls only appear for a signed-in requester.
pub fn detail(noticia: &Noticia, identity: Option<&Identity>) -> String {
    let controls = if identity.is_some() {
        format!(
            r#"<div class="controls">
<a href="/editar-noticia/{id}">Editar</a>
<form method="post" action="/noticia/{id}/excluir"><button type="submit">Excluir</button></form>
</div>
"#,
            id = noticia.id
        )
    } else {
        String::new()
    };

    let paragraphs: String = noticia
        .conteudo
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("<p>{}</p>\n", escape(l)))
        .collect();

    let body = format!(
        r#"<article>
<h1>{titulo}</h1>
<time datetime="{iso}">{data}</time>
<img src="{imagem}" alt="{titulo}">
{paragraphs}</article>
{controls}"#,
        titulo = escape(&noticia.titulo),
        iso = noticia.data_publicacao.to_rfc3339(),
        data = format_date(&noticia.data_publicacao),
        imagem = escape(&noticia.imagem),
    );

    layout(&noticia.titulo, identity, &body)
}

pub fn detail_error(identity: Option<&Identity>) -> String {
    layout("Notícia", identity, &error_box(MSG_NOTICIA_UNAVAILABLE))
}

/// Values shown by the create and edit forms.
#[derive(Debug, Default)]
pub struct FormView<'a> {
    pub heading: &'a str,
    pub action: String,
    pub submit: &'a str,
    pub titulo: &'a str,
    pub conteudo: &'a str,
    /// Image currently attached to the post being edited.
    pub current_image: Option<&'a str>,
    pub image_required: bool,
    pub error: Option<&'a str>,
}

pub fn form(view: &FormView<'_>, identity: Option<&Identity>) -> String {
    let error = view.error.map(error_box).unwrap_or_default();
    let current = view
        .current_image
        .map(|src| {
            format!(
                r#"<figure><img src="{}" alt="Imagem atual"><figcaption>Imagem atual</figcaption></figure>
"#,
                escape(src)
            )
        })
        .unwrap_or_default();
    let required = if view.image_required { " required" } else { "" };

    let body = format!(
        r#"<h1>{heading}</h1>
{error}<form method="post" action="{action}" enctype="multipart/form-data">
<label for="titulo">Título</label>
<input id="titulo" name="titulo" type="text" value="{titulo}" required>
<label for="conteudo">Conteúdo</label>
<textarea id="conteudo" name="conteudo" rows="12" required>{conteudo}</textarea>
{current}<label for="imagem">Imagem</label>
<input id="imagem" name="imagem" type="file" accept="image/*"{required}>
<button type="submit">{submit}</button>
</form>
"#,
        heading = escape(view.heading),
        action = escape(&view.action),
        titulo = escape(view.titulo),
        conteudo = escape(view.conteudo),
        submit = escape(view.submit),
    );

    layout(view.heading, identity, &body)
}

/// Sign-in page. Authentication itself happens at the external provider.
pub fn login(provider_url: Option<&str>) -> String {
    let body = match provider_url {
        Some(url) => format!(
            r#"<h1>Entrar</h1>
<p>Entre com sua conta para publicar e editar notícias.</p>
<a class="button" href="{}">Entrar com o provedor de identidade</a>
"#,
            escape(url)
        ),
        None => "<h1>Entrar</h1>\n<p>Nenhum provedor de login configurado.</p>\n".to_string(),
    };

    layout("Entrar", None, &body)
}
